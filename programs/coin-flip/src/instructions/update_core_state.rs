use crate::{constants::*, events::*, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UpdateCoreState<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CORE_STATE_SEED.as_bytes(), core_state.admin.as_ref()],
        bump = core_state.bump
    )]
    pub core_state: Account<'info, CoreState>,
}

impl<'info> UpdateCoreState<'info> {
    pub fn validate(&self, update: &CoreStateUpdate) -> Result<()> {
        self.core_state.ensure_admin(&self.signer.key())?;

        update.validate()?;

        Ok(())
    }
}

pub fn handler(
    ctx: Context<UpdateCoreState>,
    new_fee_bps: Option<u16>,
    new_win_ratio_bps: Option<u16>,
    new_active: Option<bool>,
    new_allow_direct_bet: Option<bool>,
) -> Result<()> {
    // validate
    let update = CoreStateUpdate {
        fee_bps: new_fee_bps,
        win_ratio_bps: new_win_ratio_bps,
        active: new_active,
        allow_direct_bet: new_allow_direct_bet,
    };
    ctx.accounts.validate(&update)?;

    // set fields, open bets keep the terms they were placed with
    let core_state = &mut ctx.accounts.core_state;
    core_state.apply_update(update)?;

    emit!(CoreStateUpdated {
        admin: core_state.admin,
        fee_bps: core_state.fee_bps,
        win_ratio_bps: core_state.win_ratio_bps,
        active: core_state.active,
        allow_direct_bet: core_state.allow_direct_bet,
        version: core_state.version,
    });

    Ok(())
}
