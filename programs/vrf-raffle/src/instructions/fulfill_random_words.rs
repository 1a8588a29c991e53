use anchor_lang::prelude::*;

use crate::{
    constants::VAULT_SEED,
    error::RaffleError,
    state::{Raffle, Vault},
};

/// Event emitted when a round is drawn and paid
#[event]
pub struct WinnerPicked {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winner's address
    pub winner: Pubkey,
    /// Lamports paid to the winner
    pub amount: u64,
    /// Number of completed rounds including this one
    pub round: u64,
    /// The request this draw answered
    pub request_id: u64,
}

/// Oracle callback: accepts randomness for the outstanding request, picks the
/// winner and pays out the pool.
///
/// Execution requirements:
/// 1. The signer is the raffle's VRF coordinator
/// 2. `request_id` is the outstanding request (stale and forged ids are rejected)
/// 3. At least one random word is supplied; only the first one is used
/// 4. `winner` is the player the word selects
///
/// Any failure, including a failed payout, reverts the whole fulfillment: the
/// raffle stays in Calculating and the pool stays in the vault.
///
/// After execution:
/// - The pool is transferred to the winner
/// - The winner is recorded and the raffle reopens with an empty round
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle = &ctx.accounts.raffle;

    let random_word = raffle.verify_fulfillment(
        &ctx.accounts.vrf_coordinator.key(),
        request_id,
        &random_words,
    )?;
    let (index, selected) = raffle.winner_for(&random_word)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        selected,
        RaffleError::WinnerAccountMismatch
    );
    msg!(
        "Request {} selected player {} of {}",
        request_id,
        index,
        raffle.player_count()
    );

    let amount = raffle.pool_balance;
    pay_winner(
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.winner.to_account_info(),
        amount,
    )?;

    let raffle = &mut ctx.accounts.raffle;
    raffle.complete_draw(selected, now)?;

    emit!(WinnerPicked {
        raffle: raffle.key(),
        winner: selected,
        amount,
        round: raffle.round,
        request_id,
    });

    Ok(())
}

/// Moves `amount` lamports out of the program-owned vault into the winner.
/// The winner's balance is checked afterwards to make sure the full amount landed.
fn pay_winner(vault: &AccountInfo, winner: &AccountInfo, amount: u64) -> Result<()> {
    let pre_transfer_balance = winner.lamports();

    // Transfer lamports by directly deducting from the vault and adding to the winner.
    // This only works because the vault is a PDA owned by our program.
    vault
        .sub_lamports(amount)
        .map_err(|_| error!(RaffleError::TransferFailed))?;
    winner
        .add_lamports(amount)
        .map_err(|_| error!(RaffleError::TransferFailed))?;

    require!(
        winner.lamports()
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(RaffleError::Overflow)?,
        RaffleError::TransferFailed
    );
    Ok(())
}

/// Accounts required for the fulfill_random_words instruction
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// The raffle awaiting randomness
    #[account(mut, has_one = vault @ RaffleError::InvalidVault)]
    pub raffle: Account<'info, Raffle>,

    /// Vault holding the pool
    /// PDA with seeds ["vault", raffle_key]
    #[account(
        mut,
        seeds = [
            VAULT_SEED,
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Oracle key; compared against the raffle's configured coordinator in the handler
    pub vrf_coordinator: Signer<'info>,

    /// CHECK: the selected player, receiving the pool. Matched against the
    /// drawn player in the handler; any owner can be credited.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account<'a>(
        key: &'a Pubkey,
        owner: &'a Pubkey,
        lamports: &'a mut u64,
        data: &'a mut [u8],
    ) -> AccountInfo<'a> {
        AccountInfo::new(key, false, true, lamports, data, owner, false, 0)
    }

    #[test]
    fn pays_the_full_amount() {
        let program = crate::ID;
        let system = anchor_lang::system_program::ID;
        let (vault_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut vault_lamports, mut winner_lamports) = (1_000_000 + 40_000_000, 5u64);
        let (mut vault_data, mut winner_data) = ([0u8; 0], [0u8; 0]);

        let vault = account(&vault_key, &program, &mut vault_lamports, &mut vault_data);
        let winner = account(&winner_key, &system, &mut winner_lamports, &mut winner_data);

        pay_winner(&vault, &winner, 40_000_000).unwrap();
        assert_eq!(vault.lamports(), 1_000_000);
        assert_eq!(winner.lamports(), 40_000_005);
    }

    #[test]
    fn pays_a_winner_owned_by_another_program() {
        let program = crate::ID;
        let other_program = Pubkey::new_unique();
        let (vault_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut vault_lamports, mut winner_lamports) = (1_000_000 + 20_000_000, 1_000_000u64);
        let (mut vault_data, mut winner_data) = ([0u8; 0], [0u8; 16]);

        let vault = account(&vault_key, &program, &mut vault_lamports, &mut vault_data);
        let winner = account(&winner_key, &other_program, &mut winner_lamports, &mut winner_data);

        pay_winner(&vault, &winner, 20_000_000).unwrap();
        assert_eq!(vault.lamports(), 1_000_000);
        assert_eq!(winner.lamports(), 21_000_000);
    }

    #[test]
    fn fails_when_vault_cannot_cover_the_pool() {
        let program = crate::ID;
        let system = anchor_lang::system_program::ID;
        let (vault_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut vault_lamports, mut winner_lamports) = (10u64, 0u64);
        let (mut vault_data, mut winner_data) = ([0u8; 0], [0u8; 0]);

        let vault = account(&vault_key, &program, &mut vault_lamports, &mut vault_data);
        let winner = account(&winner_key, &system, &mut winner_lamports, &mut winner_data);

        assert!(pay_winner(&vault, &winner, 11).is_err());
        assert_eq!(vault.lamports(), 10);
        assert_eq!(winner.lamports(), 0);
    }
}
