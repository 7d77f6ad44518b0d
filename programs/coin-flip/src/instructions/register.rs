use crate::{constants::*, events::*, state::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct Register<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [CORE_STATE_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.bump
    )]
    pub core_state: Account<'info, CoreState>,

    #[account(
        seeds = [VAULT_AUTH_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.vault_auth_bump
    )]
    pub vault_authority: SystemAccount<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + AssetLedger::INIT_SPACE,
        seeds = [ALLOWED_SEED.as_bytes(), mint.key().as_ref(), core_state.admin.as_ref()],
        bump
    )]
    pub asset_ledger: Box<Account<'info, AssetLedger>>,

    #[account(
        init_if_needed,
        payer = signer,
        token::mint = mint,
        token::authority = vault_authority,
        seeds = [VAULT_TOKEN_ACCOUNT_SEED.as_bytes(), mint.key().as_ref(), core_state.admin.as_ref()],
        bump
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Register<'info> {
    pub fn validate(&self) -> Result<()> {
        self.core_state.ensure_admin(&self.signer.key())?;

        self.asset_ledger.ensure_unregistered()?;

        Ok(())
    }
}

pub fn handler(ctx: Context<Register>, allowed_amounts: Vec<u64>) -> Result<()> {
    // validate
    ctx.accounts.validate()?;
    let allowed_amounts = AssetLedger::normalize_allowed_amounts(allowed_amounts)?;

    let admin = ctx.accounts.core_state.admin;
    let mint = ctx.accounts.mint.key();
    let vault_balance_account = ctx.accounts.vault_token_account.key();

    // set ledger fields
    let asset_ledger = &mut ctx.accounts.asset_ledger;
    asset_ledger.admin = admin;
    asset_ledger.mint = mint;
    asset_ledger.vault_balance_account = vault_balance_account;
    asset_ledger.allowed_amounts = allowed_amounts.clone();
    asset_ledger.reserved_liability = 0;
    asset_ledger.open_bets = 0;
    asset_ledger.created_at = Clock::get()?.unix_timestamp;
    asset_ledger.bump = ctx.bumps.asset_ledger;
    asset_ledger.vault_token_bump = ctx.bumps.vault_token_account;

    emit!(AssetRegistered {
        admin,
        mint,
        asset_ledger: asset_ledger.key(),
        vault_balance_account,
        allowed_amounts,
    });

    Ok(())
}
