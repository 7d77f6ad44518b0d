use crate::{constants::*, events::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::get_stack_height;
use anchor_lang::solana_program::sysvar::{
    instructions::{load_current_index_checked, load_instruction_at_checked, ID as SYSVAR_INSTRUCTIONS_ID},
    slot_hashes,
};
use anchor_spl::token::{Token, TokenAccount};

#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct BetDirectly<'info> {
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

    /// CHECK: pinned to the sysvar address, parsed by hand
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,

    /// CHECK: pinned to the sysvar address, read through the sysvar helpers
    #[account(address = SYSVAR_INSTRUCTIONS_ID)]
    pub sysvar_instructions: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault_token_account: Option<Box<Account<'info, TokenAccount>>>,

    #[account(mut)]
    pub signer_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> BetDirectly<'info> {
    pub fn validate(&self) -> Result<()> {
        self.core_state.ensure_direct_bet_allowed()?;

        // no caller may observe the flip before it lands or undo it afterwards
        let ixs = self.sysvar_instructions.to_account_info();
        let current_index = load_current_index_checked(&ixs)? as usize;
        let mut program_ids = Vec::new();
        while let Ok(ix) = load_instruction_at_checked(program_ids.len(), &ixs) {
            program_ids.push(ix.program_id);
        }
        ensure_standalone_call(get_stack_height(), current_index, &program_ids)?;

        Ok(())
    }
}

pub fn handler(ctx: Context<BetDirectly>, mint: Pubkey, amount: u64, side: CoinSide) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    let ledger_info = ctx.accounts.asset_ledger.to_account_info();
    let mut asset_ledger = AssetLedger::load(&ledger_info, ctx.program_id)?;

    let custody_before = custody_balance(
        &asset_ledger,
        &ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.vault_token_account.as_deref(),
    )?;
    let sequence = ctx.accounts.core_state.next_sequence()?;
    let bettor = ctx.accounts.signer.key();

    // flip
    let (slot, slot_hash) = {
        let data = ctx.accounts.slot_hashes.try_borrow_data()?;
        parse_latest_slot_hash(&data)?
    };
    let landing_slot = Clock::get()?.slot;
    let outcome = derive_outcome(&slot_hash, landing_slot, &bettor, sequence);

    // same sizing rules as an escrowed bet
    let settlement = settle_direct_flip(
        &asset_ledger,
        ctx.accounts.core_state.terms(),
        custody_before,
        amount,
        side,
        outcome,
    )?;

    // transfer from bettor to custody
    let token_leg = resolve_token_leg(
        &asset_ledger,
        &bettor,
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

    // transfer from custody to bettor
    if settlement.won {
        let seeds = ctx.accounts.core_state.vault_authority_seeds();
        let signer = &[&seeds[..]];
        transfer_out_of_vault(
            &ctx.accounts.vault_authority.to_account_info(),
            &ctx.accounts.signer.to_account_info(),
            &ctx.accounts.system_program.to_account_info(),
            token_leg.as_ref(),
            settlement.payout,
            signer,
        )?;
    }

    // set ledger fields
    asset_ledger.record_wager(amount);
    asset_ledger.record_payout(settlement.payout, settlement.fee);
    asset_ledger.store(&ledger_info)?;

    emit!(DirectBetSettled {
        admin: ctx.accounts.core_state.admin,
        bettor,
        mint,
        sequence,
        amount,
        side,
        outcome,
        slot,
        landing_slot,
        won: settlement.won,
        payout: settlement.payout,
        fee: settlement.fee,
    });

    Ok(())
}
