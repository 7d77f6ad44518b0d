use anchor_lang::prelude::*;

/// PDA Seeds
#[constant]
pub const CORE_STATE_SEED: &str = "core-state";
#[constant]
pub const VAULT_AUTH_SEED: &str = "vault-auth";
#[constant]
pub const VAULT_TOKEN_ACCOUNT_SEED: &str = "vault-token-account";
#[constant]
pub const ALLOWED_SEED: &str = "allowed";
#[constant]
pub const BET_STATE_SEED: &str = "bet-state";

pub const DISCRIMINATOR_SIZE: u8 = 8;

/// Basis points
pub const HUNDRED_PERCENT_BPS: u16 = 10_000;
pub const MAX_FEE_BPS: u16 = HUNDRED_PERCENT_BPS;
pub const MAX_WIN_RATIO_BPS: u16 = HUNDRED_PERCENT_BPS;

/// Capacity of a ledger allow-list. Keep in sync with `#[max_len]` on `AssetLedger`.
pub const MAX_ALLOWED_AMOUNTS: usize = 16;

/// Ledger key for native SOL custody (the wrapped SOL mint address).
pub const NATIVE_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

/// The only program allowed to share a transaction with a direct bet.
pub const COMPUTE_BUDGET_PROGRAM_ID: Pubkey = pubkey!("ComputeBudget111111111111111111111111111111");

/// Side of the coin picked by a bettor or produced by an outcome source.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum CoinSide {
    Heads,
    Tails,
}

/// Lifecycle of an escrowed bet
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum BetStatus {
    Open,
    Settled,
}
