use anchor_lang::prelude::*;

use crate::{constants::MAX_PLAYERS, error::RaffleError, vrf};

// Space calculation:
// 8 (discriminator) +
// 32 (authority) +
// 32 (vault) +
// 1 (bump) +
// 8 (raffle_index) +
// 106 (params) +
// 1 (state) +
// 4 + 32 * MAX_PLAYERS (players) +
// 8 (pool_balance) +
// 8 (last_draw_timestamp) +
// 9 (outstanding_request_id: Option<u64>) +
// 8 (request_nonce) +
// 8 (requested_at) +
// 33 (recent_winner: Option<Pubkey>) +
// 8 (round)
pub const RAFFLE_ACCOUNT_SIZE: usize =
    8 + 32 + 32 + 1 + 8 + RAFFLE_PARAMS_SIZE + 1 + 4 + 32 * MAX_PLAYERS + 8 + 8 + 9 + 8 + 8 + 33 + 8;

// 8 entry_fee + 8 draw_interval + 32 vrf_coordinator + 32 key_hash + 8 subscription_id
// + 2 request_confirmations + 4 callback_compute_limit + 4 num_words + 8 rerequest_grace_period
pub const RAFFLE_PARAMS_SIZE: usize = 8 + 8 + 32 + 32 + 8 + 2 + 4 + 4 + 8;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleState {
    Open = 0,
    Calculating = 1,
}

/// Immutable raffle configuration, fixed at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaffleParams {
    /// Minimum payment in lamports for one entry
    pub entry_fee: u64,
    /// Seconds that must pass between the start of a round and its draw
    pub draw_interval: i64,
    /// The only key allowed to fulfill randomness requests
    pub vrf_coordinator: Pubkey,
    /// Randomness lane the oracle should serve the request on
    pub key_hash: [u8; 32],
    /// Oracle subscription billed for requests
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
    /// Seconds after which the raffle authority may replace a stuck request.
    /// Zero disables re-requesting.
    pub rerequest_grace_period: i64,
}

/// Result of evaluating whether a draw is due, with the diagnostics needed
/// to tell "too early" from "no entrants" from "already calculating".
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,
    pub state: RaffleState,
    pub pool_balance: u64,
    pub player_count: u64,
    pub interval_elapsed: bool,
    pub seconds_until_due: i64,
}

#[account]
pub struct Raffle {
    pub authority: Pubkey,
    pub vault: Pubkey,
    pub bump: u8,
    pub raffle_index: u64,
    pub params: RaffleParams,
    pub state: RaffleState,
    pub players: Vec<Pubkey>,
    pub pool_balance: u64,
    pub last_draw_timestamp: i64,
    pub outstanding_request_id: Option<u64>,
    pub request_nonce: u64,
    pub requested_at: i64,
    pub recent_winner: Option<Pubkey>,
    pub round: u64,
}

impl Raffle {
    /// Resets every mutable field to a fresh open round starting at `now`.
    pub fn open(
        &mut self,
        authority: Pubkey,
        vault: Pubkey,
        bump: u8,
        raffle_index: u64,
        params: RaffleParams,
        now: i64,
    ) {
        self.authority = authority;
        self.vault = vault;
        self.bump = bump;
        self.raffle_index = raffle_index;
        self.params = params;
        self.state = RaffleState::Open;
        self.players = Vec::new();
        self.pool_balance = 0;
        self.last_draw_timestamp = now;
        self.outstanding_request_id = None;
        self.request_nonce = 0;
        self.requested_at = 0;
        self.recent_winner = None;
        self.round = 0;
    }

    /// Appends an entry for `player` and adds `amount` to the pool.
    /// Anything paid above the entry fee stays in the pool.
    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(
            amount >= self.params.entry_fee,
            RaffleError::NotEnoughFeeSent
        );
        require!(self.state == RaffleState::Open, RaffleError::RaffleNotOpen);
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        self.pool_balance = self
            .pool_balance
            .checked_add(amount)
            .ok_or(RaffleError::Overflow)?;
        self.players.push(player);
        Ok(())
    }

    pub fn check_upkeep(&self, now: i64) -> UpkeepStatus {
        let elapsed = now.saturating_sub(self.last_draw_timestamp);
        let interval_elapsed = elapsed >= self.params.draw_interval;
        let is_open = self.state == RaffleState::Open;
        let has_players = !self.players.is_empty();
        let has_balance = self.pool_balance > 0;

        UpkeepStatus {
            upkeep_needed: is_open && interval_elapsed && has_players && has_balance,
            state: self.state,
            pool_balance: self.pool_balance,
            player_count: self.players.len() as u64,
            interval_elapsed,
            seconds_until_due: self.params.draw_interval.saturating_sub(elapsed).max(0),
        }
    }

    /// Moves the raffle into `Calculating` with `request_id` as the single
    /// outstanding request. Fails with the upkeep diagnostics logged when no
    /// draw is due.
    pub fn begin_draw(&mut self, request_id: u64, now: i64) -> Result<()> {
        let status = self.check_upkeep(now);
        if !status.upkeep_needed {
            msg!(
                "Upkeep not needed: balance={} players={} state={:?} interval_elapsed={} due_in={}s",
                status.pool_balance,
                status.player_count,
                status.state,
                status.interval_elapsed,
                status.seconds_until_due
            );
            return err!(RaffleError::UpkeepNotNeeded);
        }

        self.state = RaffleState::Calculating;
        self.outstanding_request_id = Some(request_id);
        self.requested_at = now;
        self.request_nonce = self
            .request_nonce
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        Ok(())
    }

    /// Authenticates a fulfillment and returns the random word to draw with.
    ///
    /// The caller must be the configured coordinator and `request_id` must be
    /// the outstanding request; being in `Calculating` alone proves nothing.
    /// Only the first word is used.
    pub fn verify_fulfillment(
        &self,
        caller: &Pubkey,
        request_id: u64,
        random_words: &[[u8; 32]],
    ) -> Result<[u8; 32]> {
        require_keys_eq!(
            *caller,
            self.params.vrf_coordinator,
            RaffleError::OnlyCoordinatorCanFulfill
        );
        require!(
            self.outstanding_request_id == Some(request_id),
            RaffleError::RequestIdMismatch
        );
        let word = random_words.first().ok_or(RaffleError::NoRandomWords)?;
        Ok(*word)
    }

    /// Index and identity of the player `random_word` selects.
    pub fn winner_for(&self, random_word: &[u8; 32]) -> Result<(usize, Pubkey)> {
        let index = vrf::select_winner(random_word, self.players.len())?;
        Ok((index, self.players[index]))
    }

    /// Records `winner`, clears the round and reopens. Returns the amount
    /// that was paid out of the pool.
    pub fn complete_draw(&mut self, winner: Pubkey, now: i64) -> Result<u64> {
        require!(
            self.outstanding_request_id.is_some(),
            RaffleError::NoOutstandingRequest
        );

        let paid = self.pool_balance;
        self.recent_winner = Some(winner);
        self.players.clear();
        self.pool_balance = 0;
        // The cluster clock only moves forward, so this strictly increases
        // whenever a draw lands in a later second than the round opened.
        self.last_draw_timestamp = now.max(self.last_draw_timestamp);
        self.outstanding_request_id = None;
        self.requested_at = 0;
        self.state = RaffleState::Open;
        self.round = self.round.checked_add(1).ok_or(RaffleError::Overflow)?;
        Ok(paid)
    }

    /// Replaces a stuck request with `request_id` once the grace period has
    /// passed. Returns the id that was abandoned.
    pub fn rerequest(&mut self, request_id: u64, now: i64) -> Result<u64> {
        let grace_period = self.params.rerequest_grace_period;
        require!(grace_period > 0, RaffleError::RerequestDisabled);
        let stale = self
            .outstanding_request_id
            .ok_or(RaffleError::NoOutstandingRequest)?;
        let due = self
            .requested_at
            .checked_add(grace_period)
            .ok_or(RaffleError::Overflow)?;
        require!(now >= due, RaffleError::RerequestTooEarly);

        self.outstanding_request_id = Some(request_id);
        self.requested_at = now;
        self.request_nonce = self
            .request_nonce
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        Ok(stale)
    }

    pub fn player(&self, index: usize) -> Option<Pubkey> {
        self.players.get(index).copied()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn entry_fee(&self) -> u64 {
        self.params.entry_fee
    }

    pub fn draw_interval(&self) -> i64 {
        self.params.draw_interval
    }

    pub fn num_words(&self) -> u32 {
        self.params.num_words
    }

    pub fn request_confirmations(&self) -> u16 {
        self.params.request_confirmations
    }
}
