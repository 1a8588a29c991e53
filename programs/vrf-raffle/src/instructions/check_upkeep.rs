use anchor_lang::prelude::*;

use crate::state::{Raffle, UpkeepStatus};

/// Read-only instruction for automation keepers: reports whether a draw is due
/// and why not, without mutating anything. The status is returned as
/// instruction return data so it can be simulated.
pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.raffle.check_upkeep(now))
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    pub raffle: Account<'info, Raffle>,
}
