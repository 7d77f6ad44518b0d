#![allow(unexpected_cfgs)]
#![allow(deprecated)]

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("5G2vmwuHzznDrRQYHsK4FfXJscPMHUSqZvouCHa9SnQ7");

#[program]
pub mod coin_flip {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        executer: Pubkey,
        fee_bps: u16,
        win_ratio_bps: u16,
    ) -> Result<()> {
        initialize::handler(ctx, executer, fee_bps, win_ratio_bps)
    }

    pub fn update_core_state(
        ctx: Context<UpdateCoreState>,
        new_fee_bps: Option<u16>,
        new_win_ratio_bps: Option<u16>,
        new_active: Option<bool>,
        new_allow_direct_bet: Option<bool>,
    ) -> Result<()> {
        update_core_state::handler(
            ctx,
            new_fee_bps,
            new_win_ratio_bps,
            new_active,
            new_allow_direct_bet,
        )
    }

    pub fn set_executer(ctx: Context<SetExecuter>, new_executer: Pubkey) -> Result<()> {
        set_executer::handler(ctx, new_executer)
    }

    pub fn register(ctx: Context<Register>, allowed_amounts: Vec<u64>) -> Result<()> {
        register::handler(ctx, allowed_amounts)
    }

    pub fn update_allowed_amounts(
        ctx: Context<UpdateAllowedAmounts>,
        mint: Pubkey,
        allowed_amounts: Vec<u64>,
    ) -> Result<()> {
        update_allowed_amounts::handler(ctx, mint, allowed_amounts)
    }

    pub fn deposit(ctx: Context<Deposit>, mint: Pubkey, amount: u64) -> Result<()> {
        deposit::handler(ctx, mint, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, mint: Pubkey, amount: u64) -> Result<()> {
        withdraw::handler(ctx, mint, amount)
    }

    pub fn bet(ctx: Context<Bet>, mint: Pubkey, amount: u64, side: CoinSide) -> Result<()> {
        bet::handler(ctx, mint, amount, side)
    }

    pub fn bet_return(ctx: Context<BetReturn>, outcome: CoinSide) -> Result<()> {
        bet_return::handler(ctx, outcome)
    }

    pub fn bet_directly(
        ctx: Context<BetDirectly>,
        mint: Pubkey,
        amount: u64,
        side: CoinSide,
    ) -> Result<()> {
        bet_directly::handler(ctx, mint, amount, side)
    }

    pub fn close_bet(ctx: Context<CloseBet>) -> Result<()> {
        close_bet::handler(ctx)
    }
}
