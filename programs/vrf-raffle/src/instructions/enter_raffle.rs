use anchor_lang::prelude::*;

use crate::{
    constants::VAULT_SEED,
    error::RaffleError,
    state::{Raffle, Vault},
};

/// Event emitted when a player enters the raffle
#[event]
pub struct RaffleEntered {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The player's address
    pub player: Pubkey,
    /// Amount paid in lamports
    pub amount: u64,
    /// Number of entries in the round after this one
    pub player_count: u64,
}

/// Instruction to enter the current round of a raffle
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `amount` - Lamports to pay; must be at least the entry fee
///
/// # Security Considerations
/// 1. Rejects payments below the entry fee
/// 2. Rejects entries while a draw is being calculated
/// 3. Verifies the vault is the one stored in the raffle
/// 4. Verifies the vault received exactly `amount`
///
/// # Implementation Notes
/// - Anything paid above the entry fee stays in the pool
/// - The same player may enter any number of times; each entry is a separate slot
/// - Updates state before performing external calls
pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.raffle.record_entry(player, amount)?;

    // Store pre-transfer balance for verification
    let pre_transfer_balance = ctx.accounts.vault.to_account_info().lamports();

    // Transfer lamports from the player to the raffle vault
    anchor_lang::solana_program::program::invoke(
        &anchor_lang::solana_program::system_instruction::transfer(
            &player,
            &ctx.accounts.vault.key(),
            amount,
        ),
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
        ],
    )?;

    // Verify the transfer was successful by checking vault balance
    let post_transfer_balance = ctx.accounts.vault.to_account_info().lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(RaffleError::Overflow)?,
        RaffleError::TransferFailed
    );

    emit!(RaffleEntered {
        raffle: ctx.accounts.raffle.key(),
        player,
        amount,
        player_count: ctx.accounts.raffle.player_count() as u64,
    });

    Ok(())
}

/// Accounts required for the enter_raffle instruction
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The raffle being entered. Open-state and fee checks happen in the ledger
    #[account(mut, has_one = vault @ RaffleError::InvalidVault)]
    pub raffle: Account<'info, Raffle>,

    /// Vault that pools the entry fees
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

    /// The account entering and paying the fee
    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}
