use crate::constants::*;
use anchor_lang::prelude::*;

#[event]
pub struct BetPlaced {
    pub admin: Pubkey,
    pub bettor: Pubkey,
    pub mint: Pubkey,
    pub bet_state: Pubkey,
    pub sequence: u64,
    pub amount: u64,
    pub side: CoinSide,
    pub liability: u64,
}

#[event]
pub struct BetSettled {
    pub admin: Pubkey,
    pub bettor: Pubkey,
    pub mint: Pubkey,
    pub sequence: u64,
    pub outcome: CoinSide,
    pub won: bool,
    pub payout: u64,
    pub fee: u64,
}

#[event]
pub struct DirectBetSettled {
    pub admin: Pubkey,
    pub bettor: Pubkey,
    pub mint: Pubkey,
    pub sequence: u64,
    pub amount: u64,
    pub side: CoinSide,
    pub outcome: CoinSide,
    pub slot: u64,         // slot of the hash the outcome was drawn from
    pub landing_slot: u64, // slot the flip executed in
    pub won: bool,
    pub payout: u64,
    pub fee: u64,
}

#[event]
pub struct BetClosed {
    pub bettor: Pubkey,
    pub bet_state: Pubkey,
    pub sequence: u64,
}
