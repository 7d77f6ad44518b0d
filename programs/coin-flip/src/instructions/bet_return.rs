use crate::{constants::*, error::CoinFlipError, events::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

#[derive(Accounts)]
pub struct BetReturn<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [CORE_STATE_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.bump
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    #[account(
        mut,
        seeds = [VAULT_AUTH_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.vault_auth_bump
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [
            BET_STATE_SEED.as_bytes(),
            core_state.admin.as_ref(),
            bet_state.bettor.as_ref(),
            &bet_state.sequence.to_le_bytes()
        ],
        bump = bet_state.bump
    )]
    pub bet_state: Box<Account<'info, BetState>>,

    /// CHECK: loaded in the handler, keyed by the escrowed mint
    #[account(
        mut,
        seeds = [ALLOWED_SEED.as_bytes(), bet_state.mint.as_ref(), core_state.admin.as_ref()],
        bump
    )]
    pub asset_ledger: UncheckedAccount<'info>,

    #[account(mut, address = bet_state.bettor)]
    pub bettor: SystemAccount<'info>,

    #[account(mut)]
    pub vault_token_account: Option<Box<Account<'info, TokenAccount>>>,

    #[account(mut)]
    pub bettor_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> BetReturn<'info> {
    pub fn validate(&self) -> Result<()> {
        self.core_state.ensure_executer(&self.signer.key())?;

        self.bet_state.ensure_belongs_to(&self.core_state.admin)?;

        require!(self.bet_state.is_open(), CoinFlipError::AlreadySettled);

        Ok(())
    }
}

pub fn handler(ctx: Context<BetReturn>, outcome: CoinSide) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    let ledger_info = ctx.accounts.asset_ledger.to_account_info();
    let mut asset_ledger = AssetLedger::load(&ledger_info, ctx.program_id)?;

    // resolve with the terms locked at placement
    let settlement = ctx.accounts.bet_state.resolve(outcome)?;
    let custody_balance = custody_balance(
        &asset_ledger,
        &ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.vault_token_account.as_deref(),
    )?;
    ensure_payable(&settlement, custody_balance)?;

    // transfer from custody to bettor
    if settlement.won {
        let token_leg = resolve_token_leg(
            &asset_ledger,
            &ctx.accounts.bet_state.bettor,
            ctx.accounts.vault_token_account.as_deref(),
            ctx.accounts.bettor_token_account.as_deref(),
            &ctx.accounts.token_program.to_account_info(),
        )?;
        let seeds = ctx.accounts.core_state.vault_authority_seeds();
        let signer = &[&seeds[..]];
        transfer_out_of_vault(
            &ctx.accounts.vault_authority.to_account_info(),
            &ctx.accounts.bettor.to_account_info(),
            &ctx.accounts.system_program.to_account_info(),
            token_leg.as_ref(),
            settlement.payout,
            signer,
        )?;
    }

    // set bet fields
    let bet_state = &mut ctx.accounts.bet_state;
    bet_state.mark_settled(outcome, &settlement, Clock::get()?.unix_timestamp)?;

    // set ledger fields
    asset_ledger.release(bet_state.liability)?;
    asset_ledger.record_payout(settlement.payout, settlement.fee);
    asset_ledger.store(&ledger_info)?;

    emit!(BetSettled {
        admin: bet_state.admin,
        bettor: bet_state.bettor,
        mint: bet_state.mint,
        sequence: bet_state.sequence,
        outcome,
        won: settlement.won,
        payout: settlement.payout,
        fee: settlement.fee,
    });

    Ok(())
}
