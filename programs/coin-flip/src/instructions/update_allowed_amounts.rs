use crate::{constants::*, events::*, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct UpdateAllowedAmounts<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [CORE_STATE_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.bump
    )]
    pub core_state: Account<'info, CoreState>,

    /// CHECK: loaded in the handler so an unregistered mint reports `MintNotRegistered`
    #[account(
        mut,
        seeds = [ALLOWED_SEED.as_bytes(), mint.as_ref(), core_state.admin.as_ref()],
        bump
    )]
    pub asset_ledger: UncheckedAccount<'info>,
}

impl<'info> UpdateAllowedAmounts<'info> {
    pub fn validate(&self) -> Result<()> {
        self.core_state.ensure_admin(&self.signer.key())?;

        Ok(())
    }
}

pub fn handler(
    ctx: Context<UpdateAllowedAmounts>,
    mint: Pubkey,
    allowed_amounts: Vec<u64>,
) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    let ledger_info = ctx.accounts.asset_ledger.to_account_info();
    let mut asset_ledger = AssetLedger::load(&ledger_info, ctx.program_id)?;
    asset_ledger.allowed_amounts = AssetLedger::normalize_allowed_amounts(allowed_amounts)?;
    asset_ledger.store(&ledger_info)?;

    emit!(AllowedAmountsUpdated {
        admin: ctx.accounts.core_state.admin,
        mint,
        allowed_amounts: asset_ledger.allowed_amounts,
    });

    Ok(())
}
