use crate::{constants::*, events::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init_if_needed,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + CoreState::INIT_SPACE,
        seeds = [CORE_STATE_SEED.as_bytes(), signer.key().as_ref()],
        bump
    )]
    pub core_state: Account<'info, CoreState>,

    #[account(
        mut,
        seeds = [VAULT_AUTH_SEED.as_bytes(), signer.key().as_ref()],
        bump
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        init_if_needed,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + AssetLedger::INIT_SPACE,
        seeds = [ALLOWED_SEED.as_bytes(), NATIVE_MINT.as_ref(), signer.key().as_ref()],
        bump
    )]
    pub native_ledger: Account<'info, AssetLedger>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn validate(&self, executer: Pubkey, fee_bps: u16, win_ratio_bps: u16) -> Result<()> {
        self.core_state.ensure_uninitialized()?;

        FlipTerms::new(fee_bps, win_ratio_bps)?;

        CoreState::validate_executer(&self.signer.key(), &executer)?;

        Ok(())
    }
}

pub fn handler(
    ctx: Context<Initialize>,
    executer: Pubkey,
    fee_bps: u16,
    win_ratio_bps: u16,
) -> Result<()> {
    // validate
    ctx.accounts.validate(executer, fee_bps, win_ratio_bps)?;

    let admin = ctx.accounts.signer.key();
    let now = Clock::get()?.unix_timestamp;

    // fund the vault authority up to its rent-exempt floor
    let floor = Rent::get()?.minimum_balance(0);
    let shortfall = floor.saturating_sub(ctx.accounts.vault_authority.lamports());
    if shortfall > 0 {
        let transfer_accounts = Transfer {
            from: ctx.accounts.signer.to_account_info(),
            to: ctx.accounts.vault_authority.to_account_info(),
        };
        let transfer_ctx = CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            transfer_accounts,
        );
        transfer(transfer_ctx, shortfall)?;
    }

    // set core state fields
    let core_state = &mut ctx.accounts.core_state;
    core_state.admin = admin;
    core_state.executer = executer;
    core_state.fee_bps = fee_bps;
    core_state.win_ratio_bps = win_ratio_bps;
    core_state.active = true;
    core_state.allow_direct_bet = false;
    core_state.flip_counter = 0;
    core_state.version = 0;
    core_state.bump = ctx.bumps.core_state;
    core_state.vault_auth_bump = ctx.bumps.vault_authority;

    // register native SOL custody
    let native_ledger = &mut ctx.accounts.native_ledger;
    native_ledger.admin = admin;
    native_ledger.mint = NATIVE_MINT;
    native_ledger.vault_balance_account = ctx.accounts.vault_authority.key();
    native_ledger.allowed_amounts = Vec::new();
    native_ledger.created_at = now;
    native_ledger.bump = ctx.bumps.native_ledger;

    emit!(CoreStateInitialized {
        admin,
        core_state: core_state.key(),
        executer,
        fee_bps,
        win_ratio_bps,
    });

    msg!("coin flip vault initialized for {}", admin);

    Ok(())
}
