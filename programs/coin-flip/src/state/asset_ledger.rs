use crate::{constants::*, error::CoinFlipError};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Debug)]
pub struct AssetLedger {
    // --- Identity ---
    pub admin: Pubkey,                 // The vault this ledger belongs to.
    pub mint: Pubkey,                  // The asset held in custody, NATIVE_MINT for SOL.
    pub vault_balance_account: Pubkey, // The account actually holding the funds.

    // --- Wager Rules ---
    #[max_len(16)]
    pub allowed_amounts: Vec<u64>, // Sorted allow-list. Empty means any amount.

    // --- Escrow Accounting ---
    pub reserved_liability: u64, // Sum of what open bets may still draw from custody.
    pub open_bets: u64,          // Number of open escrowed bets.

    // --- Stats ---
    pub total_deposited: u64,
    pub total_withdrawn: u64,
    pub total_wagered: u64,
    pub total_paid_out: u64,
    pub total_fees: u64,

    // --- Metadata ---
    pub created_at: i64,
    pub bump: u8,
    pub vault_token_bump: u8, // Unused for SOL custody.
}

impl AssetLedger {
    /// Reads a ledger from a PDA that may not have been registered yet.
    pub fn load(info: &AccountInfo, program_id: &Pubkey) -> Result<Self> {
        require!(
            info.owner == program_id && !info.data_is_empty(),
            CoinFlipError::MintNotRegistered
        );
        let data = info.try_borrow_data()?;
        AssetLedger::try_deserialize(&mut &data[..])
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }

    pub fn is_registered(&self) -> bool {
        self.admin != Pubkey::default()
    }

    pub fn ensure_unregistered(&self) -> Result<()> {
        require!(!self.is_registered(), CoinFlipError::AlreadyRegistered);
        Ok(())
    }

    pub fn is_native(&self) -> bool {
        self.mint == NATIVE_MINT
    }

    pub fn is_amount_allowed(&self, amount: u64) -> bool {
        self.allowed_amounts.is_empty() || self.allowed_amounts.binary_search(&amount).is_ok()
    }

    /// Sorts and de-duplicates an allow-list, rejecting zero entries and overflowing lists.
    pub fn normalize_allowed_amounts(mut amounts: Vec<u64>) -> Result<Vec<u64>> {
        require!(
            amounts.iter().all(|amount| *amount > 0),
            CoinFlipError::InvalidAllowedAmounts
        );
        amounts.sort_unstable();
        amounts.dedup();
        require!(
            amounts.len() <= MAX_ALLOWED_AMOUNTS,
            CoinFlipError::InvalidAllowedAmounts
        );
        Ok(amounts)
    }

    /// Custody not earmarked for open bets.
    pub fn free_balance(&self, custody_balance: u64) -> u64 {
        custody_balance.saturating_sub(self.reserved_liability)
    }

    pub fn ensure_can_cover(&self, custody_balance: u64, liability: u64) -> Result<()> {
        require!(
            self.free_balance(custody_balance) >= liability,
            CoinFlipError::InsufficientLiquidity
        );
        Ok(())
    }

    pub fn ensure_can_withdraw(&self, custody_balance: u64, amount: u64) -> Result<()> {
        require!(
            self.free_balance(custody_balance) >= amount,
            CoinFlipError::InsufficientFunds
        );
        Ok(())
    }

    pub fn reserve(&mut self, liability: u64) -> Result<()> {
        self.reserved_liability = self
            .reserved_liability
            .checked_add(liability)
            .ok_or(CoinFlipError::Overflow)?;
        self.open_bets = self
            .open_bets
            .checked_add(1)
            .ok_or(CoinFlipError::Overflow)?;
        Ok(())
    }

    pub fn release(&mut self, liability: u64) -> Result<()> {
        self.reserved_liability = self
            .reserved_liability
            .checked_sub(liability)
            .ok_or(CoinFlipError::Underflow)?;
        self.open_bets = self
            .open_bets
            .checked_sub(1)
            .ok_or(CoinFlipError::Underflow)?;
        Ok(())
    }

    pub fn record_deposit(&mut self, amount: u64) {
        self.total_deposited = self.total_deposited.saturating_add(amount);
    }

    pub fn record_withdrawal(&mut self, amount: u64) {
        self.total_withdrawn = self.total_withdrawn.saturating_add(amount);
    }

    pub fn record_wager(&mut self, amount: u64) {
        self.total_wagered = self.total_wagered.saturating_add(amount);
    }

    pub fn record_payout(&mut self, payout: u64, fee: u64) {
        self.total_paid_out = self.total_paid_out.saturating_add(payout);
        self.total_fees = self.total_fees.saturating_add(fee);
    }
}
