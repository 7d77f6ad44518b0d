use crate::{constants::*, events::*, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct CloseBet<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        close = signer,
        seeds = [
            BET_STATE_SEED.as_bytes(),
            bet_state.admin.as_ref(),
            bet_state.bettor.as_ref(),
            &bet_state.sequence.to_le_bytes()
        ],
        bump = bet_state.bump
    )]
    pub bet_state: Account<'info, BetState>,
}

impl<'info> CloseBet<'info> {
    pub fn validate(&self) -> Result<()> {
        self.bet_state.ensure_closable(&self.signer.key())?;

        Ok(())
    }
}

pub fn handler(ctx: Context<CloseBet>) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    emit!(BetClosed {
        bettor: ctx.accounts.signer.key(),
        bet_state: ctx.accounts.bet_state.key(),
        sequence: ctx.accounts.bet_state.sequence,
    });

    Ok(())
}
