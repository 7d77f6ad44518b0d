use crate::{constants::*, error::CoinFlipError};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use anchor_lang::solana_program::instruction::TRANSACTION_LEVEL_STACK_HEIGHT;

const SLOT_HASH_ENTRY_SIZE: usize = 40; // slot (u64) + hash ([u8; 32])

/// Returns the newest `(slot, hash)` entry of raw `SlotHashes` sysvar data.
pub fn parse_latest_slot_hash(data: &[u8]) -> Result<(u64, [u8; 32])> {
    let count_bytes = data.get(..8).ok_or(CoinFlipError::SlotHashesUnavailable)?;
    let mut count = [0u8; 8];
    count.copy_from_slice(count_bytes);
    require!(
        u64::from_le_bytes(count) > 0,
        CoinFlipError::SlotHashesUnavailable
    );

    // Entries are stored newest first.
    let entry = data
        .get(8..8 + SLOT_HASH_ENTRY_SIZE)
        .ok_or(CoinFlipError::SlotHashesUnavailable)?;
    let mut slot = [0u8; 8];
    slot.copy_from_slice(&entry[..8]);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&entry[8..]);

    Ok((u64::from_le_bytes(slot), hash))
}

/// The direct flip must be a top-level instruction of this program and share
/// its transaction with compute budget instructions only, so no other program
/// can read the result before it lands or abort the transaction after a loss.
pub fn ensure_standalone_call(
    stack_height: usize,
    current_index: usize,
    program_ids: &[Pubkey],
) -> Result<()> {
    require!(
        stack_height == TRANSACTION_LEVEL_STACK_HEIGHT
            && program_ids.get(current_index) == Some(&crate::ID),
        CoinFlipError::CpiNotAllowed
    );
    require!(
        program_ids
            .iter()
            .enumerate()
            .all(|(i, id)| i == current_index || *id == COMPUTE_BUDGET_PROGRAM_ID),
        CoinFlipError::ForeignInstructions
    );
    Ok(())
}

/// `landing_slot` is the slot the flip executes in, which the bettor does not
/// know when signing.
pub fn derive_outcome(
    slot_hash: &[u8; 32],
    landing_slot: u64,
    bettor: &Pubkey,
    sequence: u64,
) -> CoinSide {
    let digest = hashv(&[
        &slot_hash[..],
        &landing_slot.to_le_bytes(),
        bettor.as_ref(),
        &sequence.to_le_bytes(),
    ]);
    match digest.to_bytes()[0] & 1 {
        0 => CoinSide::Heads,
        _ => CoinSide::Tails,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sysvar_data(entries: &[(u64, [u8; 32])]) -> Vec<u8> {
        let mut data = (entries.len() as u64).to_le_bytes().to_vec();
        for (slot, hash) in entries {
            data.extend_from_slice(&slot.to_le_bytes());
            data.extend_from_slice(hash);
        }
        data
    }

    fn bank_hash(slot: u64) -> [u8; 32] {
        hashv(&[&b"bank"[..], &slot.to_le_bytes()]).to_bytes()
    }

    #[test]
    fn test_parse_latest_slot_hash() {
        let data = sysvar_data(&[(1_002, [7u8; 32]), (1_001, [3u8; 32])]);

        let (slot, hash) = parse_latest_slot_hash(&data).unwrap();

        assert_eq!(slot, 1_002);
        assert_eq!(hash, [7u8; 32]);
    }

    #[test]
    fn test_parse_empty_sysvar() {
        assert_eq!(
            parse_latest_slot_hash(&sysvar_data(&[])).unwrap_err(),
            CoinFlipError::SlotHashesUnavailable.into()
        );
        assert_eq!(
            parse_latest_slot_hash(&[]).unwrap_err(),
            CoinFlipError::SlotHashesUnavailable.into()
        );
    }

    #[test]
    fn test_parse_truncated_entry() {
        let mut data = sysvar_data(&[(9, [1u8; 32])]);
        data.truncate(20);

        assert_eq!(
            parse_latest_slot_hash(&data).unwrap_err(),
            CoinFlipError::SlotHashesUnavailable.into()
        );
    }

    #[test]
    fn test_derive_outcome_is_deterministic() {
        let bettor = Pubkey::new_unique();
        let hash = [42u8; 32];

        assert_eq!(
            derive_outcome(&hash, 100, &bettor, 5),
            derive_outcome(&hash, 100, &bettor, 5)
        );
    }

    #[test]
    fn test_derive_outcome_covers_both_sides() {
        let bettor = Pubkey::new_unique();
        let hash = [9u8; 32];

        let outcomes: Vec<CoinSide> = (0..64)
            .map(|seq| derive_outcome(&hash, 100, &bettor, seq))
            .collect();

        assert!(outcomes.contains(&CoinSide::Heads));
        assert!(outcomes.contains(&CoinSide::Tails));
    }

    #[test]
    fn test_outcome_depends_on_landing_slot() {
        let bettor = Pubkey::new_unique();
        let hash = [9u8; 32];

        let outcomes: Vec<CoinSide> = (1_000..1_064)
            .map(|slot| derive_outcome(&hash, slot, &bettor, 7))
            .collect();

        assert!(outcomes.contains(&CoinSide::Heads));
        assert!(outcomes.contains(&CoinSide::Tails));
    }

    #[test]
    fn test_side_chosen_from_visible_sysvar_does_not_win_reliably() {
        let bettor = Pubkey::new_unique();
        let mut wins = 0;

        for sequence in 0..200u64 {
            // what the bettor reads when signing
            let seen_slot = 50_000 + sequence * 17;
            let seen = sysvar_data(&[(seen_slot, bank_hash(seen_slot))]);
            let (slot, hash) = parse_latest_slot_hash(&seen).unwrap();
            let side = derive_outcome(&hash, slot + 1, &bettor, sequence);

            // what the flip reads when the transaction lands
            let landing_slot = seen_slot + 2 + sequence % 3;
            let landed = sysvar_data(&[(landing_slot - 1, bank_hash(landing_slot - 1))]);
            let (_, hash) = parse_latest_slot_hash(&landed).unwrap();
            let outcome = derive_outcome(&hash, landing_slot, &bettor, sequence);

            if side == outcome {
                wins += 1;
            }
        }

        assert!((50..=150).contains(&wins), "bettor won {wins} of 200");
    }

    #[test]
    fn test_standalone_call_accepted() {
        let top = TRANSACTION_LEVEL_STACK_HEIGHT;

        assert!(ensure_standalone_call(top, 0, &[crate::ID]).is_ok());
        assert!(ensure_standalone_call(
            top,
            2,
            &[COMPUTE_BUDGET_PROGRAM_ID, COMPUTE_BUDGET_PROGRAM_ID, crate::ID]
        )
        .is_ok());
    }

    #[test]
    fn test_invocation_from_another_program_rejected() {
        let wrapper = Pubkey::new_unique();

        // inner instruction of a wrapper that calls the flip
        assert_eq!(
            ensure_standalone_call(TRANSACTION_LEVEL_STACK_HEIGHT + 1, 0, &[wrapper]).unwrap_err(),
            CoinFlipError::CpiNotAllowed.into()
        );
        assert_eq!(
            ensure_standalone_call(TRANSACTION_LEVEL_STACK_HEIGHT, 0, &[wrapper]).unwrap_err(),
            CoinFlipError::CpiNotAllowed.into()
        );
    }

    #[test]
    fn test_instructions_around_the_flip_rejected() {
        let top = TRANSACTION_LEVEL_STACK_HEIGHT;
        let checker = Pubkey::new_unique();

        // a later instruction could assert on the result and abort a loss
        assert_eq!(
            ensure_standalone_call(top, 0, &[crate::ID, checker]).unwrap_err(),
            CoinFlipError::ForeignInstructions.into()
        );
        // an earlier one could precompute the result from the same sysvars
        assert_eq!(
            ensure_standalone_call(top, 1, &[checker, crate::ID]).unwrap_err(),
            CoinFlipError::ForeignInstructions.into()
        );
        assert_eq!(
            ensure_standalone_call(top, 1, &[crate::ID, crate::ID]).unwrap_err(),
            CoinFlipError::ForeignInstructions.into()
        );
    }
}
