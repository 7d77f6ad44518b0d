use anchor_lang::prelude::*;

#[error_code]
pub enum CoinFlipError {
    // General Program Errors (0x1000 - 0x1999)
    #[msg("Core state has already been initialized for this admin")]
    AlreadyInitialized = 0x1000,

    #[msg("Unauthorized action for this account")]
    Unauthorized = 0x1001,

    #[msg("Signer is not the executer of this vault")]
    WrongExecuter = 0x1002,

    #[msg("Vault is not accepting new bets")]
    VaultInactive = 0x1003,

    #[msg("Direct bets are disabled for this vault")]
    DirectBetDisabled = 0x1004,

    #[msg("Direct bets must be a top-level instruction of this program")]
    CpiNotAllowed = 0x1005,

    #[msg("Direct bets cannot share a transaction with other instructions")]
    ForeignInstructions = 0x1006,

    // Configuration Errors (0x2000 - 0x2999)
    #[msg("Fee basis points must not exceed 10000")]
    InvalidFee = 0x2000,

    #[msg("Win ratio basis points must not exceed 10000")]
    InvalidWinRatio = 0x2001,

    #[msg("Executer must be set and must differ from the admin")]
    InvalidExecuter = 0x2002,

    #[msg("Allowed amounts must be non-zero and fit the allow-list capacity")]
    InvalidAllowedAmounts = 0x2003,

    // Asset Errors (0x3000 - 0x3999)
    #[msg("Mint is not registered for this vault")]
    MintNotRegistered = 0x3000,

    #[msg("Mint is already registered for this vault")]
    AlreadyRegistered = 0x3001,

    #[msg("Token accounts are required for SPL custody")]
    MissingTokenAccounts = 0x3002,

    #[msg("Vault token account does not match the asset ledger")]
    InvalidVaultAccount = 0x3003,

    #[msg("Token mint does not match the asset ledger")]
    TokenMintMismatch = 0x3004,

    #[msg("Token account owner mismatch")]
    TokenOwnerMismatch = 0x3005,

    // Betting Errors (0x4000 - 0x4999)
    #[msg("Amount must be greater than 0")]
    InvalidAmount = 0x4000,

    #[msg("Amount is not in the allow-list for this mint")]
    AmountNotAllowed = 0x4001,

    #[msg("Bet has already been settled")]
    AlreadySettled = 0x4002,

    #[msg("Bet has not been settled yet")]
    BetNotSettled = 0x4003,

    #[msg("Bet does not belong to this vault")]
    BetMismatch = 0x4004,

    // Liquidity Errors (0x5000 - 0x5999)
    #[msg("Vault liquidity cannot cover this payout")]
    InsufficientLiquidity = 0x5000,

    #[msg("Withdrawal exceeds the free vault balance")]
    InsufficientFunds = 0x5001,

    // Math & Sysvar Errors (0x6000 - 0x6999)
    #[msg("Arithmetic overflow")]
    Overflow = 0x6000,

    #[msg("Arithmetic underflow")]
    Underflow = 0x6001,

    #[msg("Slot hashes sysvar has no usable entry")]
    SlotHashesUnavailable = 0x6002,
}
