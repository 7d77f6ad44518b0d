use crate::{error::CoinFlipError, state::AssetLedger};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, TokenAccount};

/// SPL accounts taking part in a custody transfer.
pub struct TokenLeg<'info> {
    pub vault: AccountInfo<'info>,
    pub holder: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

/// Picks the token accounts an SPL ledger needs, or `None` for native SOL.
pub fn resolve_token_leg<'info>(
    ledger: &AssetLedger,
    owner: &Pubkey,
    vault_token_account: Option<&Account<'info, TokenAccount>>,
    holder_token_account: Option<&Account<'info, TokenAccount>>,
    token_program: &AccountInfo<'info>,
) -> Result<Option<TokenLeg<'info>>> {
    if ledger.is_native() {
        return Ok(None);
    }

    let (vault, holder) = vault_token_account
        .zip(holder_token_account)
        .ok_or(CoinFlipError::MissingTokenAccounts)?;

    require_keys_eq!(
        vault.key(),
        ledger.vault_balance_account,
        CoinFlipError::InvalidVaultAccount
    );
    require_keys_eq!(vault.mint, ledger.mint, CoinFlipError::TokenMintMismatch);
    require_keys_eq!(holder.mint, ledger.mint, CoinFlipError::TokenMintMismatch);
    require_keys_eq!(holder.owner, *owner, CoinFlipError::TokenOwnerMismatch);

    Ok(Some(TokenLeg {
        vault: vault.to_account_info(),
        holder: holder.to_account_info(),
        token_program: token_program.clone(),
    }))
}

/// Spendable custody: the vault token balance, or the vault authority lamports
/// above its rent-exempt floor.
pub fn custody_balance(
    ledger: &AssetLedger,
    vault_authority: &AccountInfo,
    vault_token_account: Option<&Account<TokenAccount>>,
) -> Result<u64> {
    if ledger.is_native() {
        let floor = Rent::get()?.minimum_balance(0);
        return Ok(vault_authority.lamports().saturating_sub(floor));
    }

    let vault = vault_token_account.ok_or(CoinFlipError::MissingTokenAccounts)?;
    Ok(vault.amount)
}

pub fn transfer_into_vault<'info>(
    payer: &AccountInfo<'info>,
    vault_authority: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    token_leg: Option<&TokenLeg<'info>>,
    amount: u64,
) -> Result<()> {
    match token_leg {
        Some(leg) => {
            let transfer_accounts = token::Transfer {
                from: leg.holder.clone(),
                to: leg.vault.clone(),
                authority: payer.clone(),
            };
            let transfer_ctx = CpiContext::new(leg.token_program.clone(), transfer_accounts);
            token::transfer(transfer_ctx, amount)
        }
        None => {
            let transfer_accounts = system_program::Transfer {
                from: payer.clone(),
                to: vault_authority.clone(),
            };
            let transfer_ctx = CpiContext::new(system_program.clone(), transfer_accounts);
            system_program::transfer(transfer_ctx, amount)
        }
    }
}

pub fn transfer_out_of_vault<'info>(
    vault_authority: &AccountInfo<'info>,
    recipient: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    token_leg: Option<&TokenLeg<'info>>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    match token_leg {
        Some(leg) => {
            let transfer_accounts = token::Transfer {
                from: leg.vault.clone(),
                to: leg.holder.clone(),
                authority: vault_authority.clone(),
            };
            let transfer_ctx = CpiContext::new_with_signer(
                leg.token_program.clone(),
                transfer_accounts,
                signer_seeds,
            );
            token::transfer(transfer_ctx, amount)
        }
        None => {
            let transfer_accounts = system_program::Transfer {
                from: vault_authority.clone(),
                to: recipient.clone(),
            };
            let transfer_ctx = CpiContext::new_with_signer(
                system_program.clone(),
                transfer_accounts,
                signer_seeds,
            );
            system_program::transfer(transfer_ctx, amount)
        }
    }
}
