use crate::{constants::*, events::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct Bet<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
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

    /// CHECK: loaded in the handler so an unregistered mint reports `MintNotRegistered`
    #[account(
        mut,
        seeds = [ALLOWED_SEED.as_bytes(), mint.as_ref(), core_state.admin.as_ref()],
        bump
    )]
    pub asset_ledger: UncheckedAccount<'info>,

    #[account(
        init,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + BetState::INIT_SPACE,
        seeds = [
            BET_STATE_SEED.as_bytes(),
            core_state.admin.as_ref(),
            signer.key().as_ref(),
            &core_state.flip_counter.to_le_bytes()
        ],
        bump
    )]
    pub bet_state: Box<Account<'info, BetState>>,

    #[account(mut)]
    pub vault_token_account: Option<Box<Account<'info, TokenAccount>>>,

    #[account(mut)]
    pub signer_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Bet<'info> {
    pub fn validate(&self) -> Result<()> {
        self.core_state.ensure_can_bet(&self.signer.key())?;

        Ok(())
    }
}

pub fn handler(ctx: Context<Bet>, mint: Pubkey, amount: u64, side: CoinSide) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    let ledger_info = ctx.accounts.asset_ledger.to_account_info();
    let mut asset_ledger = AssetLedger::load(&ledger_info, ctx.program_id)?;

    // size the wager against free custody
    let custody_balance = custody_balance(
        &asset_ledger,
        &ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.vault_token_account.as_deref(),
    )?;
    let terms = ctx.accounts.core_state.terms();
    let wager = plan_wager(&asset_ledger, terms, custody_balance, amount)?;
    let sequence = ctx.accounts.core_state.next_sequence()?;

    // transfer from bettor to custody
    let token_leg = resolve_token_leg(
        &asset_ledger,
        &ctx.accounts.signer.key(),
        ctx.accounts.vault_token_account.as_deref(),
        ctx.accounts.signer_token_account.as_deref(),
        &ctx.accounts.token_program.to_account_info(),
    )?;
    transfer_into_vault(
        &ctx.accounts.signer.to_account_info(),
        &ctx.accounts.vault_authority.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        token_leg.as_ref(),
        amount,
    )?;

    // set bet fields
    let admin = ctx.accounts.core_state.admin;
    let bettor = ctx.accounts.signer.key();
    let bet_state = &mut ctx.accounts.bet_state;
    bet_state.sequence = sequence;
    bet_state.admin = admin;
    bet_state.bettor = bettor;
    bet_state.mint = mint;
    bet_state.amount = amount;
    bet_state.side = side;
    bet_state.fee_bps = terms.fee_bps;
    bet_state.win_ratio_bps = terms.win_ratio_bps;
    bet_state.liability = wager.liability;
    bet_state.status = BetStatus::Open;
    bet_state.outcome = None;
    bet_state.payout = 0;
    bet_state.created_at = Clock::get()?.unix_timestamp;
    bet_state.settled_at = None;
    bet_state.bump = ctx.bumps.bet_state;

    // set ledger fields
    asset_ledger.reserve(wager.liability)?;
    asset_ledger.record_wager(amount);
    asset_ledger.store(&ledger_info)?;

    emit!(BetPlaced {
        admin,
        bettor,
        mint,
        bet_state: bet_state.key(),
        sequence,
        amount,
        side,
        liability: wager.liability,
    });

    Ok(())
}
