use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Entry fee must be at least the rent-exempt minimum of an empty account")]
    InvalidEntryFee,
    #[msg("Draw interval must be greater than zero")]
    InvalidDrawInterval,
    #[msg("Re-request grace period cannot be negative")]
    InvalidGracePeriod,
    #[msg("Number of random words must be between 1 and the maximum allowed")]
    InvalidNumWords,
    #[msg("Only the program management authority can create raffles")]
    NotProgramManagementAuthority,
    #[msg("Only the raffle authority can perform this action")]
    NotRaffleAuthority,
    #[msg("Payment is below the entry fee")]
    NotEnoughFeeSent,
    #[msg("Raffle is not open")]
    RaffleNotOpen,
    #[msg("Raffle has reached its maximum number of entries")]
    RaffleFull,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Only the VRF coordinator can fulfill randomness requests")]
    OnlyCoordinatorCanFulfill,
    #[msg("Request id does not match the outstanding request")]
    RequestIdMismatch,
    #[msg("Fulfillment carried no random words")]
    NoRandomWords,
    #[msg("Winner account does not match the selected player")]
    WinnerAccountMismatch,
    #[msg("Vault does not match the raffle")]
    InvalidVault,
    #[msg("Transfer failed")]
    TransferFailed,
    #[msg("No players in the raffle")]
    NoPlayers,
    #[msg("There is no outstanding randomness request")]
    NoOutstandingRequest,
    #[msg("Re-requesting randomness is disabled for this raffle")]
    RerequestDisabled,
    #[msg("Grace period for the outstanding request has not passed")]
    RerequestTooEarly,
}
