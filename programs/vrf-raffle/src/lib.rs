use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod vrf;

use state::{RaffleParams, UpkeepStatus};

declare_id!("4bDyvbTXoqkX5FwXvMwXfhUvWWC5cP5ngmX1PBV6hTqA");

#[program]
pub mod vrf_raffle {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
        instructions::init_config::init_config(ctx)
    }

    pub fn create_raffle(ctx: Context<CreateRaffle>, params: RaffleParams) -> Result<()> {
        instructions::create_raffle::create_raffle(ctx, params)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        instructions::enter_raffle::enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
        instructions::check_upkeep::check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        instructions::perform_upkeep::perform_upkeep(ctx)
    }

    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::fulfill_random_words::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn rerequest_randomness(ctx: Context<RerequestRandomness>) -> Result<()> {
        instructions::rerequest_randomness::rerequest_randomness(ctx)
    }
}
