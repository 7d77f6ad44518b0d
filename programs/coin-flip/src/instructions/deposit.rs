use crate::{constants::*, error::CoinFlipError, events::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [CORE_STATE_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.bump
    )]
    pub core_state: Account<'info, CoreState>,

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

    #[account(mut)]
    pub vault_token_account: Option<Box<Account<'info, TokenAccount>>>,

    #[account(mut)]
    pub signer_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn validate(&self, amount: u64) -> Result<()> {
        self.core_state.ensure_admin(&self.signer.key())?;

        require!(amount > 0, CoinFlipError::InvalidAmount);

        Ok(())
    }
}

pub fn handler(ctx: Context<Deposit>, mint: Pubkey, amount: u64) -> Result<()> {
    // validate
    ctx.accounts.validate(amount)?;

    let ledger_info = ctx.accounts.asset_ledger.to_account_info();
    let mut asset_ledger = AssetLedger::load(&ledger_info, ctx.program_id)?;

    // transfer from admin to custody
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

    // set ledger fields
    asset_ledger.record_deposit(amount);
    asset_ledger.store(&ledger_info)?;

    if let Some(vault) = ctx.accounts.vault_token_account.as_mut() {
        vault.reload()?;
    }
    let custody_balance = custody_balance(
        &asset_ledger,
        &ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.vault_token_account.as_deref(),
    )?;

    emit!(Deposited {
        admin: ctx.accounts.core_state.admin,
        mint,
        amount,
        custody_balance,
    });

    Ok(())
}
