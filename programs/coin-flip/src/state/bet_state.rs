use crate::{
    constants::*,
    error::CoinFlipError,
    utils::{resolve_flip, FlipTerms, Settlement},
};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Debug)]
pub struct BetState {
    // --- Identify ---
    pub sequence: u64,  // Flip counter value taken at placement.
    pub admin: Pubkey,  // The vault the bet was placed against.
    pub bettor: Pubkey, // The player who funded the escrow.
    pub mint: Pubkey,   // The escrowed asset.

    // --- Bet Info ---
    pub amount: u64,        // Escrowed stake.
    pub side: CoinSide,     // The side picked by the bettor.
    pub fee_bps: u16,       // Fee locked at placement.
    pub win_ratio_bps: u16, // Win ratio locked at placement.
    pub liability: u64,     // Amount reserved on the asset ledger for this bet.

    // --- State ---
    pub status: BetStatus,           // Open until the executer settles it.
    pub outcome: Option<CoinSide>,   // Winning side supplied at settlement.
    pub payout: u64,                 // Amount transferred to the bettor.

    // --- Metadata ---
    pub created_at: i64,
    pub settled_at: Option<i64>,
    pub bump: u8,
}

impl BetState {
    pub fn terms(&self) -> FlipTerms {
        FlipTerms {
            fee_bps: self.fee_bps,
            win_ratio_bps: self.win_ratio_bps,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == BetStatus::Open
    }

    pub fn ensure_belongs_to(&self, admin: &Pubkey) -> Result<()> {
        require_keys_eq!(self.admin, *admin, CoinFlipError::BetMismatch);
        Ok(())
    }

    /// Only the bettor may reclaim the rent, and only once the bet is settled.
    pub fn ensure_closable(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.bettor, CoinFlipError::Unauthorized);
        require!(!self.is_open(), CoinFlipError::BetNotSettled);
        Ok(())
    }

    /// Computes the settlement of an open bet without touching it.
    pub fn resolve(&self, outcome: CoinSide) -> Result<Settlement> {
        require!(self.is_open(), CoinFlipError::AlreadySettled);
        resolve_flip(self.amount, self.side, outcome, self.terms())
    }

    pub fn mark_settled(&mut self, outcome: CoinSide, settlement: &Settlement, now: i64) -> Result<()> {
        require!(self.is_open(), CoinFlipError::AlreadySettled);
        self.status = BetStatus::Settled;
        self.outcome = Some(outcome);
        self.payout = settlement.payout;
        self.settled_at = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_bet(amount: u64, side: CoinSide) -> BetState {
        BetState {
            sequence: 7,
            admin: Pubkey::new_unique(),
            bettor: Pubkey::new_unique(),
            mint: NATIVE_MINT,
            amount,
            side,
            fee_bps: 500,
            win_ratio_bps: 4_500,
            liability: 6_887_500,
            status: BetStatus::Open,
            outcome: None,
            payout: 0,
            created_at: 1_700_000_000,
            settled_at: None,
            bump: 255,
        }
    }

    #[test]
    fn test_settle_winning_bet() {
        let mut bet = open_bet(5_000_000, CoinSide::Heads);

        let settlement = bet.resolve(CoinSide::Heads).unwrap();
        bet.mark_settled(CoinSide::Heads, &settlement, 1_700_000_100).unwrap();

        assert!(settlement.won);
        assert_eq!(settlement.payout, 6_887_500);
        assert_eq!(settlement.fee, 362_500);
        assert_eq!(bet.status, BetStatus::Settled);
        assert_eq!(bet.outcome, Some(CoinSide::Heads));
        assert_eq!(bet.payout, 6_887_500);
        assert_eq!(bet.settled_at, Some(1_700_000_100));
    }

    #[test]
    fn test_settle_losing_bet() {
        let mut bet = open_bet(5_000_000, CoinSide::Heads);

        let settlement = bet.resolve(CoinSide::Tails).unwrap();
        bet.mark_settled(CoinSide::Tails, &settlement, 1_700_000_100).unwrap();

        assert!(!settlement.won);
        assert_eq!(settlement.payout, 0);
        assert_eq!(bet.payout, 0);
        assert_eq!(bet.outcome, Some(CoinSide::Tails));
    }

    #[test]
    fn test_settlement_is_exactly_once() {
        let mut bet = open_bet(1_000, CoinSide::Tails);
        let settlement = bet.resolve(CoinSide::Tails).unwrap();
        bet.mark_settled(CoinSide::Tails, &settlement, 10).unwrap();

        assert_eq!(
            bet.resolve(CoinSide::Tails).unwrap_err(),
            CoinFlipError::AlreadySettled.into()
        );
        assert_eq!(
            bet.mark_settled(CoinSide::Heads, &settlement, 20).unwrap_err(),
            CoinFlipError::AlreadySettled.into()
        );
        // the first settlement is untouched
        assert_eq!(bet.outcome, Some(CoinSide::Tails));
        assert_eq!(bet.settled_at, Some(10));
    }

    #[test]
    fn test_locked_terms_are_used() {
        let mut bet = open_bet(10_000, CoinSide::Heads);
        bet.fee_bps = 0;
        bet.win_ratio_bps = 10_000;

        let settlement = bet.resolve(CoinSide::Heads).unwrap();

        assert_eq!(settlement.payout, 20_000);
        assert_eq!(settlement.fee, 0);
    }

    #[test]
    fn test_ensure_belongs_to() {
        let bet = open_bet(1_000, CoinSide::Heads);

        assert!(bet.ensure_belongs_to(&bet.admin).is_ok());
        assert_eq!(
            bet.ensure_belongs_to(&Pubkey::new_unique()).unwrap_err(),
            CoinFlipError::BetMismatch.into()
        );
    }

    #[test]
    fn test_open_bet_cannot_be_closed() {
        let bet = open_bet(1_000, CoinSide::Heads);

        assert_eq!(
            bet.ensure_closable(&bet.bettor).unwrap_err(),
            CoinFlipError::BetNotSettled.into()
        );
    }

    #[test]
    fn test_only_bettor_closes_settled_bet() {
        let mut bet = open_bet(1_000, CoinSide::Heads);
        let settlement = bet.resolve(CoinSide::Tails).unwrap();
        bet.mark_settled(CoinSide::Tails, &settlement, 10).unwrap();

        assert!(bet.ensure_closable(&bet.bettor).is_ok());
        for intruder in [bet.admin, Pubkey::new_unique()] {
            assert_eq!(
                bet.ensure_closable(&intruder).unwrap_err(),
                CoinFlipError::Unauthorized.into()
            );
        }
    }
}
