use anchor_lang::prelude::*;

use crate::{error::RaffleError, state::Raffle, vrf};

/// Event emitted when a stuck request is replaced
#[event]
pub struct RandomnessRerequested {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The abandoned request; fulfillments for it are rejected from now on
    pub stale_request_id: u64,
    /// The replacement request
    pub request_id: u64,
}

/// Opt-in recovery for a raffle stuck in Calculating because the oracle never
/// answered. Disabled unless the raffle was created with a non-zero
/// `rerequest_grace_period`.
///
/// # Security Considerations
/// 1. Only the raffle authority can re-request
/// 2. The grace period must have passed since the outstanding request was made
/// 3. The old request id is replaced, so a late answer to it cannot pay out
///
/// Players and pool are left as they are; the round is still drawn from the
/// same entries.
pub fn rerequest_randomness(ctx: Context<RerequestRandomness>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle_key = ctx.accounts.raffle.key();
    let raffle = &mut ctx.accounts.raffle;

    let request_id = vrf::derive_request_id(&raffle_key, &raffle.params, raffle.request_nonce);
    let stale_request_id = raffle.rerequest(request_id, now)?;

    msg!("Replaced request {} with {}", stale_request_id, request_id);
    emit!(RandomnessRerequested {
        raffle: raffle_key,
        stale_request_id,
        request_id,
    });
    emit!(vrf::random_words_request(raffle_key, &raffle.params, request_id));

    Ok(())
}

#[derive(Accounts)]
pub struct RerequestRandomness<'info> {
    #[account(mut, has_one = authority @ RaffleError::NotRaffleAuthority)]
    pub raffle: Account<'info, Raffle>,

    pub authority: Signer<'info>,
}
