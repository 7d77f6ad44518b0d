use crate::{constants::*, error::CoinFlipError, state::AssetLedger};
use anchor_lang::prelude::*;

/// Fee and win ratio a wager is settled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipTerms {
    pub fee_bps: u16,
    pub win_ratio_bps: u16,
}

impl FlipTerms {
    pub fn new(fee_bps: u16, win_ratio_bps: u16) -> Result<Self> {
        require!(fee_bps <= MAX_FEE_BPS, CoinFlipError::InvalidFee);
        require!(
            win_ratio_bps <= MAX_WIN_RATIO_BPS,
            CoinFlipError::InvalidWinRatio
        );
        Ok(Self {
            fee_bps,
            win_ratio_bps,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub gross: u64, // stake plus winnings
    pub fee: u64,   // retained by the vault
    pub net: u64,   // transferred to the bettor
}

/// An accepted wager, sized against the vault before any funds move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wager {
    pub amount: u64,
    pub liability: u64,
    pub win_payout: Payout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub won: bool,
    pub payout: u64,
    pub fee: u64,
}

/// `amount * bps / 10_000`, rounded down.
pub fn apply_bps(amount: u64, bps: u16) -> Result<u64> {
    let value = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(CoinFlipError::Overflow)?
        .checked_div(HUNDRED_PERCENT_BPS as u128)
        .ok_or(CoinFlipError::Underflow)?;
    u64::try_from(value).map_err(|_| CoinFlipError::Overflow.into())
}

pub fn calculate_win_payout(amount: u64, terms: FlipTerms) -> Result<Payout> {
    let winnings = apply_bps(amount, terms.win_ratio_bps)?;
    let gross = amount
        .checked_add(winnings)
        .ok_or(CoinFlipError::Overflow)?;
    let fee = apply_bps(gross, terms.fee_bps)?;
    let net = gross.checked_sub(fee).ok_or(CoinFlipError::Underflow)?;
    Ok(Payout { gross, fee, net })
}

/// Allow-list and liquidity checks shared by the escrowed and the direct bet paths.
pub fn plan_wager(
    ledger: &AssetLedger,
    terms: FlipTerms,
    custody_balance: u64,
    amount: u64,
) -> Result<Wager> {
    require!(amount > 0, CoinFlipError::InvalidAmount);
    require!(
        ledger.is_amount_allowed(amount),
        CoinFlipError::AmountNotAllowed
    );

    // an open bet may draw the larger of its stake and its win payout
    let win_payout = calculate_win_payout(amount, terms)?;
    let liability = win_payout.net.max(amount);
    ledger.ensure_can_cover(custody_balance, liability)?;

    Ok(Wager {
        amount,
        liability,
        win_payout,
    })
}

pub fn is_winner(side: CoinSide, outcome: CoinSide) -> bool {
    side == outcome
}

pub fn resolve_flip(
    amount: u64,
    side: CoinSide,
    outcome: CoinSide,
    terms: FlipTerms,
) -> Result<Settlement> {
    if !is_winner(side, outcome) {
        return Ok(Settlement {
            won: false,
            payout: 0,
            fee: 0,
        });
    }

    let payout = calculate_win_payout(amount, terms)?;
    Ok(Settlement {
        won: true,
        payout: payout.net,
        fee: payout.fee,
    })
}

/// Sizes and resolves a single-instruction bet. Nothing is reserved: the
/// liquidity check in `plan_wager` runs against custody before the stake
/// arrives, so a win is always payable.
pub fn settle_direct_flip(
    ledger: &AssetLedger,
    terms: FlipTerms,
    custody_balance: u64,
    amount: u64,
    side: CoinSide,
    outcome: CoinSide,
) -> Result<Settlement> {
    plan_wager(ledger, terms, custody_balance, amount)?;
    resolve_flip(amount, side, outcome, terms)
}

/// A payout is made in full or not at all.
pub fn ensure_payable(settlement: &Settlement, custody_balance: u64) -> Result<()> {
    require!(
        settlement.payout <= custody_balance,
        CoinFlipError::InsufficientLiquidity
    );
    Ok(())
}
