use crate::{constants::*, events::*, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct SetExecuter<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CORE_STATE_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.bump
    )]
    pub core_state: Account<'info, CoreState>,
}

impl<'info> SetExecuter<'info> {
    pub fn validate(&self) -> Result<()> {
        self.core_state.ensure_admin(&self.signer.key())?;

        Ok(())
    }
}

pub fn handler(ctx: Context<SetExecuter>, new_executer: Pubkey) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    // set fields
    let core_state = &mut ctx.accounts.core_state;
    let old_executer = core_state.rotate_executer(new_executer)?;

    emit!(ExecuterChanged {
        admin: core_state.admin,
        old_executer,
        new_executer,
    });

    msg!("Executer rotated from {} to {}", old_executer, new_executer);

    Ok(())
}
