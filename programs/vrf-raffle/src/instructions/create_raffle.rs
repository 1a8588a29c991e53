use crate::{
    constants::{CONFIG_SEED, MAX_NUM_WORDS, RAFFLE_SEED, VAULT_SEED},
    error::RaffleError,
    state::{Config, Raffle, RaffleParams, Vault, RAFFLE_ACCOUNT_SIZE, VAULT_ACCOUNT_SIZE},
};
use anchor_lang::prelude::*;

/// Event emitted when a raffle is created
#[event]
pub struct RaffleCreated {
    /// The pubkey of the created raffle
    pub raffle: Pubkey,
    /// Sequential index the raffle PDA was derived from
    pub raffle_index: u64,
    /// Entry fee in lamports
    pub entry_fee: u64,
    /// Seconds between draws
    pub draw_interval: i64,
    /// Key allowed to fulfill randomness requests
    pub vrf_coordinator: Pubkey,
    /// When the first round opened
    pub opened_at: i64,
}

/// Instruction to create a new raffle with the given immutable parameters
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `params` - Entry fee, draw interval and oracle connection parameters
///
/// # Security Considerations
/// 1. Validates caller is the management authority via config PDA
/// 2. Ensures entry_fee covers the rent-exempt minimum of an empty account, so
///    the pool can always be credited to a winner, and draw_interval is greater than 0
/// 3. Ensures num_words is within 1..=MAX_NUM_WORDS
/// 4. Ensures the re-request grace period is not negative
/// 5. Uses a PDA for the vault with proper seeds
///
/// # Implementation Notes
/// - Opens the first round immediately, stamped with the current time
/// - The raffle authority is the management authority that created it
pub fn create_raffle(ctx: Context<CreateRaffle>, params: RaffleParams) -> Result<()> {
    validate_params(&params, Rent::get()?.minimum_balance(0))?;

    let current_time = Clock::get()?.unix_timestamp;
    let raffle_index = ctx.accounts.config.raffle_counter;
    let vault_key = ctx.accounts.vault.key();

    ctx.accounts.raffle.open(
        ctx.accounts.management_authority.key(),
        vault_key,
        ctx.bumps.raffle,
        raffle_index,
        params,
        current_time,
    );
    ctx.accounts.vault.bump = ctx.bumps.vault;
    ctx.accounts.vault.raffle = ctx.accounts.raffle.key();

    // Increment the raffle counter
    ctx.accounts.config.raffle_counter = raffle_index
        .checked_add(1)
        .ok_or(RaffleError::Overflow)?;

    emit!(RaffleCreated {
        raffle: ctx.accounts.raffle.key(),
        raffle_index,
        entry_fee: params.entry_fee,
        draw_interval: params.draw_interval,
        vrf_coordinator: params.vrf_coordinator,
        opened_at: current_time,
    });

    Ok(())
}

pub fn validate_params(params: &RaffleParams, min_entry_fee: u64) -> Result<()> {
    require!(
        params.entry_fee > 0 && params.entry_fee >= min_entry_fee,
        RaffleError::InvalidEntryFee
    );
    require!(params.draw_interval > 0, RaffleError::InvalidDrawInterval);
    require!(
        params.num_words > 0 && params.num_words <= MAX_NUM_WORDS,
        RaffleError::InvalidNumWords
    );
    require!(
        params.rerequest_grace_period >= 0,
        RaffleError::InvalidGracePeriod
    );
    Ok(())
}

#[derive(Accounts)]
pub struct CreateRaffle<'info> {
    #[account(
        init,
        payer = management_authority,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [
            RAFFLE_SEED,
            config.raffle_counter.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
    pub management_authority: Signer<'info>,

    #[account(
        init,
        payer = management_authority,
        space = VAULT_ACCOUNT_SIZE,
        seeds = [
            VAULT_SEED,
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub vault: Account<'info, Vault>,

    /// The config account storing the management authority and raffle counter
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = management_authority @ RaffleError::NotProgramManagementAuthority,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min_fee() -> u64 {
        Rent::default().minimum_balance(0)
    }

    fn params() -> RaffleParams {
        RaffleParams {
            entry_fee: 10_000_000,
            draw_interval: 30,
            vrf_coordinator: Pubkey::new_unique(),
            key_hash: [0u8; 32],
            subscription_id: 1,
            request_confirmations: 3,
            callback_compute_limit: 200_000,
            num_words: 1,
            rerequest_grace_period: 0,
        }
    }

    #[test]
    fn accepts_sane_params() {
        assert!(validate_params(&params(), min_fee()).is_ok());

        let mut max_words = params();
        max_words.num_words = MAX_NUM_WORDS;
        assert!(validate_params(&max_words, min_fee()).is_ok());
    }

    #[test]
    fn rejects_degenerate_params() {
        let mut free = params();
        free.entry_fee = 0;
        assert!(validate_params(&free, min_fee()).is_err());

        let mut below_rent = params();
        below_rent.entry_fee = min_fee() - 1;
        assert!(validate_params(&below_rent, min_fee()).is_err());

        let mut at_rent = params();
        at_rent.entry_fee = min_fee();
        assert!(validate_params(&at_rent, min_fee()).is_ok());

        let mut instant = params();
        instant.draw_interval = 0;
        assert!(validate_params(&instant, min_fee()).is_err());

        let mut no_words = params();
        no_words.num_words = 0;
        assert!(validate_params(&no_words, min_fee()).is_err());

        let mut too_many_words = params();
        too_many_words.num_words = MAX_NUM_WORDS + 1;
        assert!(validate_params(&too_many_words, min_fee()).is_err());

        let mut negative_grace = params();
        negative_grace.rerequest_grace_period = -1;
        assert!(validate_params(&negative_grace, min_fee()).is_err());
    }
}
