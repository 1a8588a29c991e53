use anchor_lang::prelude::*;

/// Maximum number of entries a single round can hold.
/// The raffle account is allocated for this many players up front.
#[constant]
pub const MAX_PLAYERS: usize = 200;

/// Maximum number of random words a raffle may ask the oracle for
#[constant]
pub const MAX_NUM_WORDS: u32 = 10;

#[constant]
pub const CONFIG_SEED: &[u8] = b"config";

#[constant]
pub const RAFFLE_SEED: &[u8] = b"raffle";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";
