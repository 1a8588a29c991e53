use anchor_lang::prelude::*;

use crate::{state::Raffle, vrf};

/// Starts a draw when one is due and asks the oracle for randomness.
///
/// Anyone may call this; the upkeep check is the only gate. When no draw is due
/// the diagnostics are logged and the call fails with `UpkeepNotNeeded`,
/// leaving the raffle untouched.
///
/// After execution:
/// - The raffle is in Calculating state and rejects new entries
/// - The request id is stored as the single outstanding request
/// - `RandomWordsRequested` carries the request to the oracle
pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle_key = ctx.accounts.raffle.key();
    let raffle = &mut ctx.accounts.raffle;

    let request_id = vrf::derive_request_id(&raffle_key, &raffle.params, raffle.request_nonce);
    raffle.begin_draw(request_id, now)?;

    msg!(
        "Requested randomness {} for {} players",
        request_id,
        raffle.player_count()
    );
    emit!(vrf::random_words_request(raffle_key, &raffle.params, request_id));

    Ok(())
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,
}
