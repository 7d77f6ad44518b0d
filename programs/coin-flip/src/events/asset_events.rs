use anchor_lang::prelude::*;

#[event]
pub struct AssetRegistered {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub asset_ledger: Pubkey,
    pub vault_balance_account: Pubkey,
    pub allowed_amounts: Vec<u64>,
}

#[event]
pub struct AllowedAmountsUpdated {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub allowed_amounts: Vec<u64>,
}

#[event]
pub struct Deposited {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub custody_balance: u64,
}

#[event]
pub struct Withdrawn {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub custody_balance: u64,
}
