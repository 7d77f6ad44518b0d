use crate::{constants::*, error::CoinFlipError, utils::FlipTerms};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Debug)]
pub struct CoreState {
    // --- Authorities ---
    pub admin: Pubkey,    // Owner of the vault. Immutable after initialize.
    pub executer: Pubkey, // The only signer allowed to settle escrowed bets.

    // --- Wager Terms ---
    pub fee_bps: u16,       // Fee retained by the vault on every winning payout.
    pub win_ratio_bps: u16, // Profit paid on top of the stake on a win.

    // --- Flags ---
    pub active: bool,           // New bets are rejected while false.
    pub allow_direct_bet: bool, // Gates the single-instruction bet path.

    // --- Global State ---
    pub flip_counter: u64, // Next sequence number handed to a bet.

    // --- Metadata ---
    pub version: u8,         // Incremented on every configuration update.
    pub bump: u8,            // A bump seed for PDA.
    pub vault_auth_bump: u8, // Bump of the vault authority PDA.
}

/// Partial configuration change. `None` keeps the current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreStateUpdate {
    pub fee_bps: Option<u16>,
    pub win_ratio_bps: Option<u16>,
    pub active: Option<bool>,
    pub allow_direct_bet: Option<bool>,
}

impl CoreStateUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(fee_bps) = self.fee_bps {
            require!(fee_bps <= MAX_FEE_BPS, CoinFlipError::InvalidFee);
        }

        if let Some(win_ratio_bps) = self.win_ratio_bps {
            require!(
                win_ratio_bps <= MAX_WIN_RATIO_BPS,
                CoinFlipError::InvalidWinRatio
            );
        }

        Ok(())
    }
}

impl CoreState {
    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    pub fn ensure_uninitialized(&self) -> Result<()> {
        require!(!self.is_initialized(), CoinFlipError::AlreadyInitialized);
        Ok(())
    }

    pub fn ensure_admin(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.admin, CoinFlipError::Unauthorized);
        Ok(())
    }

    pub fn ensure_executer(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.executer, CoinFlipError::WrongExecuter);
        Ok(())
    }

    /// Escrowed bets: the vault must be active and the executer may not wager.
    pub fn ensure_can_bet(&self, bettor: &Pubkey) -> Result<()> {
        require!(self.active, CoinFlipError::VaultInactive);
        require!(*bettor != self.executer, CoinFlipError::Unauthorized);
        Ok(())
    }

    pub fn ensure_direct_bet_allowed(&self) -> Result<()> {
        require!(self.allow_direct_bet, CoinFlipError::DirectBetDisabled);
        require!(self.active, CoinFlipError::VaultInactive);
        Ok(())
    }

    pub fn terms(&self) -> FlipTerms {
        FlipTerms {
            fee_bps: self.fee_bps,
            win_ratio_bps: self.win_ratio_bps,
        }
    }

    /// Hands out the current flip counter and advances it. Never wraps.
    pub fn next_sequence(&mut self) -> Result<u64> {
        let sequence = self.flip_counter;
        self.flip_counter = sequence
            .checked_add(1)
            .ok_or(CoinFlipError::Overflow)?;
        Ok(sequence)
    }

    /// Validates the whole update before touching any field.
    pub fn apply_update(&mut self, update: CoreStateUpdate) -> Result<()> {
        update.validate()?;

        if let Some(fee_bps) = update.fee_bps {
            self.fee_bps = fee_bps;
        }

        if let Some(win_ratio_bps) = update.win_ratio_bps {
            self.win_ratio_bps = win_ratio_bps;
        }

        if let Some(active) = update.active {
            self.active = active;
        }

        if let Some(allow_direct_bet) = update.allow_direct_bet {
            self.allow_direct_bet = allow_direct_bet;
        }

        self.bump_version();
        Ok(())
    }

    /// Replaces the settlement authority and returns the previous one.
    pub fn rotate_executer(&mut self, new_executer: Pubkey) -> Result<Pubkey> {
        Self::validate_executer(&self.admin, &new_executer)?;
        let old_executer = self.executer;
        self.executer = new_executer;
        self.bump_version();
        Ok(old_executer)
    }

    pub fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Signer seeds of the vault authority PDA.
    pub fn vault_authority_seeds(&self) -> [&[u8]; 3] {
        [
            VAULT_AUTH_SEED.as_bytes(),
            self.admin.as_ref(),
            std::slice::from_ref(&self.vault_auth_bump),
        ]
    }

    pub fn validate_executer(admin: &Pubkey, executer: &Pubkey) -> Result<()> {
        require!(
            *executer != Pubkey::default() && executer != admin,
            CoinFlipError::InvalidExecuter
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_state(flip_counter: u64) -> CoreState {
        CoreState {
            admin: Pubkey::new_unique(),
            executer: Pubkey::new_unique(),
            fee_bps: 500,
            win_ratio_bps: 4_500,
            active: true,
            allow_direct_bet: false,
            flip_counter,
            version: 0,
            bump: 255,
            vault_auth_bump: 254,
        }
    }

    #[test]
    fn test_next_sequence_is_strictly_increasing() {
        let mut state = core_state(0);

        let sequences: Vec<u64> = (0..32).map(|_| state.next_sequence().unwrap()).collect();

        assert_eq!(sequences.first(), Some(&0));
        assert!(sequences.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(state.flip_counter, 32);
    }

    #[test]
    fn test_next_sequence_never_wraps() {
        let mut state = core_state(u64::MAX);

        let result = state.next_sequence();

        assert_eq!(result.unwrap_err(), CoinFlipError::Overflow.into());
        assert_eq!(state.flip_counter, u64::MAX);
    }

    #[test]
    fn test_terms_mirror_config() {
        let state = core_state(0);
        let terms = state.terms();

        assert_eq!(terms.fee_bps, 500);
        assert_eq!(terms.win_ratio_bps, 4_500);
    }

    #[test]
    fn test_is_initialized() {
        let mut state = core_state(0);
        assert!(state.is_initialized());
        assert_eq!(
            state.ensure_uninitialized().unwrap_err(),
            CoinFlipError::AlreadyInitialized.into()
        );

        state.admin = Pubkey::default();
        assert!(!state.is_initialized());
        assert!(state.ensure_uninitialized().is_ok());
    }

    #[test]
    fn test_ensure_admin() {
        let state = core_state(0);

        assert!(state.ensure_admin(&state.admin).is_ok());
        for intruder in [state.executer, Pubkey::new_unique()] {
            assert_eq!(
                state.ensure_admin(&intruder).unwrap_err(),
                CoinFlipError::Unauthorized.into()
            );
        }
    }

    #[test]
    fn test_ensure_executer() {
        let state = core_state(0);

        assert!(state.ensure_executer(&state.executer).is_ok());
        assert_eq!(
            state.ensure_executer(&state.admin).unwrap_err(),
            CoinFlipError::WrongExecuter.into()
        );
    }

    #[test]
    fn test_executer_cannot_bet() {
        let mut state = core_state(0);

        assert!(state.ensure_can_bet(&Pubkey::new_unique()).is_ok());
        assert_eq!(
            state.ensure_can_bet(&state.executer).unwrap_err(),
            CoinFlipError::Unauthorized.into()
        );

        state.active = false;
        assert_eq!(
            state.ensure_can_bet(&Pubkey::new_unique()).unwrap_err(),
            CoinFlipError::VaultInactive.into()
        );
    }

    #[test]
    fn test_direct_bet_gate() {
        let mut state = core_state(0);
        assert_eq!(
            state.ensure_direct_bet_allowed().unwrap_err(),
            CoinFlipError::DirectBetDisabled.into()
        );

        state.allow_direct_bet = true;
        assert!(state.ensure_direct_bet_allowed().is_ok());

        state.active = false;
        assert_eq!(
            state.ensure_direct_bet_allowed().unwrap_err(),
            CoinFlipError::VaultInactive.into()
        );
    }

    #[test]
    fn test_partial_update_keeps_unset_fields() {
        let mut state = core_state(0);

        state
            .apply_update(CoreStateUpdate {
                fee_bps: Some(250),
                allow_direct_bet: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(state.fee_bps, 250);
        assert!(state.allow_direct_bet);
        assert_eq!(state.win_ratio_bps, 4_500);
        assert!(state.active);
        assert_eq!(state.version, 1);

        state.apply_update(CoreStateUpdate::default()).unwrap();
        assert_eq!(state.fee_bps, 250);
        assert_eq!(state.version, 2);
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let mut state = core_state(0);

        let result = state.apply_update(CoreStateUpdate {
            fee_bps: Some(100),
            win_ratio_bps: Some(10_001),
            active: Some(false),
            ..Default::default()
        });

        assert_eq!(result.unwrap_err(), CoinFlipError::InvalidWinRatio.into());
        assert_eq!(state.fee_bps, 500);
        assert!(state.active);
        assert_eq!(state.version, 0);

        let result = state.apply_update(CoreStateUpdate {
            fee_bps: Some(10_001),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err(), CoinFlipError::InvalidFee.into());
    }

    #[test]
    fn test_rotate_executer() {
        let mut state = core_state(0);
        let old = state.executer;
        let new = Pubkey::new_unique();

        assert_eq!(state.rotate_executer(new).unwrap(), old);
        assert_eq!(state.executer, new);
        assert_eq!(state.version, 1);

        let admin = state.admin;
        assert_eq!(
            state.rotate_executer(admin).unwrap_err(),
            CoinFlipError::InvalidExecuter.into()
        );
        assert_eq!(state.executer, new);
    }

    #[test]
    fn test_validate_executer() {
        let admin = Pubkey::new_unique();

        assert!(CoreState::validate_executer(&admin, &Pubkey::new_unique()).is_ok());
        assert_eq!(
            CoreState::validate_executer(&admin, &admin).unwrap_err(),
            CoinFlipError::InvalidExecuter.into()
        );
        assert_eq!(
            CoreState::validate_executer(&admin, &Pubkey::default()).unwrap_err(),
            CoinFlipError::InvalidExecuter.into()
        );
    }

    #[test]
    fn test_vault_authority_seeds_match_pda_derivation() {
        let program_id = Pubkey::new_unique();
        let mut state = core_state(0);
        let (expected, bump) = Pubkey::find_program_address(
            &[VAULT_AUTH_SEED.as_bytes(), state.admin.as_ref()],
            &program_id,
        );
        state.vault_auth_bump = bump;

        let seeds = state.vault_authority_seeds();
        let derived = Pubkey::create_program_address(&seeds, &program_id).unwrap();

        assert_eq!(derived, expected);
    }
}
