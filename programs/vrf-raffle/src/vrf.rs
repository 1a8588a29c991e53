//! Randomness request plumbing shared by the draw instructions.
//!
//! The oracle watches for [`RandomWordsRequested`] events, serves the request on
//! the given lane, and answers by signing `fulfill_random_words` with the
//! coordinator key stored on the raffle.
use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use arrayref::array_ref;

use crate::{error::RaffleError, state::RaffleParams};

/// Emitted when a raffle asks the oracle for randomness
#[event]
pub struct RandomWordsRequested {
    /// The pubkey of the raffle waiting on the request
    pub raffle: Pubkey,
    /// Correlation id the fulfillment must echo back
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
}

/// Derives the id for the `nonce`-th request a raffle makes.
///
/// Binding the raffle, lane and subscription into the digest keeps ids from
/// different raffles served by one oracle from colliding.
pub fn derive_request_id(raffle: &Pubkey, params: &RaffleParams, nonce: u64) -> u64 {
    let digest = hashv(&[
        raffle.as_ref(),
        &params.key_hash,
        &params.subscription_id.to_le_bytes(),
        &nonce.to_le_bytes(),
    ])
    .to_bytes();
    u64::from_le_bytes(*array_ref![digest, 0, 8])
}

pub fn random_words_request(
    raffle: Pubkey,
    params: &RaffleParams,
    request_id: u64,
) -> RandomWordsRequested {
    RandomWordsRequested {
        raffle,
        request_id,
        key_hash: params.key_hash,
        subscription_id: params.subscription_id,
        request_confirmations: params.request_confirmations,
        callback_compute_limit: params.callback_compute_limit,
        num_words: params.num_words,
    }
}

/// Maps a random word onto a player index: `random_word mod player_count`.
///
/// The word is read as a 256-bit big-endian unsigned integer and reduced in
/// full, so the result matches a plain wide-integer modulo, bias included.
pub fn select_winner(random_word: &[u8; 32], player_count: usize) -> Result<usize> {
    require!(player_count > 0, RaffleError::NoPlayers);

    let modulus = player_count as u128;
    let index = random_word
        .iter()
        .fold(0u128, |acc, byte| (acc * 256 + *byte as u128) % modulus);
    Ok(index as usize)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Random word holding `value` in its low 64 bits
    pub(crate) fn word(value: u64) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        word
    }

    fn params() -> RaffleParams {
        RaffleParams {
            entry_fee: 10_000_000,
            draw_interval: 30,
            vrf_coordinator: Pubkey::new_unique(),
            key_hash: [1u8; 32],
            subscription_id: 9,
            request_confirmations: 3,
            callback_compute_limit: 200_000,
            num_words: 2,
            rerequest_grace_period: 0,
        }
    }

    #[test]
    fn small_words_reduce_like_u64() {
        assert_eq!(select_winner(&word(7), 1).unwrap(), 0);
        assert_eq!(select_winner(&word(7), 4).unwrap(), 3);
        assert_eq!(select_winner(&word(8), 4).unwrap(), 0);
        assert_eq!(select_winner(&word(u64::MAX), 10).unwrap(), 5);
    }

    #[test]
    fn high_bytes_take_part_in_the_modulo() {
        // 2^248
        let mut high = [0u8; 32];
        high[0] = 1;
        assert_eq!(select_winner(&high, 3).unwrap(), 1);
        assert_eq!(select_winner(&high, 4).unwrap(), 0);
        // 2^256 - 1 is divisible by 3, 5 and 17
        assert_eq!(select_winner(&[0xff; 32], 3).unwrap(), 0);
        assert_eq!(select_winner(&[0xff; 32], 5).unwrap(), 0);
        assert_eq!(select_winner(&[0xff; 32], 17).unwrap(), 0);
        assert_eq!(select_winner(&[0xff; 32], 4).unwrap(), 3);
    }

    #[test]
    fn selection_needs_players() {
        assert!(select_winner(&word(1), 0).is_err());
    }

    #[test]
    fn request_ids_are_bound_to_raffle_and_nonce() {
        let params = params();
        let raffle = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        let first = derive_request_id(&raffle, &params, 0);
        assert_eq!(first, derive_request_id(&raffle, &params, 0));
        assert_ne!(first, derive_request_id(&raffle, &params, 1));
        assert_ne!(first, derive_request_id(&other, &params, 0));

        let mut other_lane = params;
        other_lane.key_hash = [2u8; 32];
        assert_ne!(first, derive_request_id(&raffle, &other_lane, 0));
    }

    #[test]
    fn request_event_echoes_params() {
        let params = params();
        let raffle = Pubkey::new_unique();
        let event = random_words_request(raffle, &params, 42);

        assert_eq!(event.raffle, raffle);
        assert_eq!(event.request_id, 42);
        assert_eq!(event.key_hash, params.key_hash);
        assert_eq!(event.subscription_id, 9);
        assert_eq!(event.request_confirmations, 3);
        assert_eq!(event.callback_compute_limit, 200_000);
        assert_eq!(event.num_words, 2);
    }
}
