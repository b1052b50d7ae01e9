//! Block author resolution.
//!
//! The author of a block is the validator whose turn the block's slot falls
//! on. The slot is read from the digest:
//!
//! 1. The first consensus item decides. An Aura item yields its slot; any
//!    other engine yields nothing, and seals are not consulted.
//! 2. Without a consensus item, the first seal is read with the legacy layout
//!    of a slot followed by the signature.
//!
//! The slot then selects `validators[slot mod N]`.

use tracing::trace;

use crate::{
    blockdata::digest::{ConsensusPayload, Digest},
    validator::{AccountId, ValidatorSet},
};

/// Extracts the authoring slot from a digest.
///
/// # Returns
///
/// * `None` - If the first consensus item is not Aura, or there is no
///   consensus item and no seal long enough to hold a slot
/// * `Some(u64)` - The slot
pub fn extract_slot(digest: &Digest) -> Option<u64> {
    if let Some(item) = digest.first_consensus() {
        return match item.as_consensus()? {
            ConsensusPayload::Aura { slot } => {
                trace!(slot, "Slot from Aura consensus item");
                Some(slot)
            }
            ConsensusPayload::Opaque { engine, .. } => {
                trace!(%engine, "First consensus item carries no slot");
                None
            }
        };
    }

    let seal = digest.first_seal()?.as_seal()?;
    trace!(slot = seal.slot(), "Slot from seal");
    Some(seal.slot())
}

/// Resolves the author of a block from its digest and the active validators.
///
/// # Returns
///
/// * `None` - If no slot can be extracted or the validator set is empty
/// * `Some(AccountId)` - The validator at `slot mod validators.len()`
pub fn resolve_author<'a>(digest: &Digest, validators: &'a ValidatorSet) -> Option<&'a AccountId> {
    let slot = extract_slot(digest)?;
    validators.by_slot(slot)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::blockdata::digest::{DigestItem, EngineId, Payload};

    fn aura(slot: u64) -> DigestItem {
        DigestItem::Consensus(EngineId::AURA, Payload::new(slot.to_le_bytes().to_vec()).unwrap())
    }

    fn seal(slot: u64) -> DigestItem {
        let mut data = slot.to_le_bytes().to_vec();
        data.extend_from_slice(&[0xee; 64]);
        DigestItem::Seal(EngineId::AURA, Payload::new(data).unwrap())
    }

    fn grandpa() -> DigestItem {
        DigestItem::Consensus(EngineId::GRANDPA, Payload::new(vec![1, 2, 3]).unwrap())
    }

    fn validators(count: u8) -> ValidatorSet {
        (0..count).map(|i| AccountId::from_byte_array([i; 32])).collect()
    }

    fn index_of(author: Option<&AccountId>) -> Option<u8> {
        author.map(|id| id.as_byte_array()[0])
    }

    #[test]
    fn test_aura_slot() {
        let digest = Digest::new(vec![aura(5)]);
        assert_eq!(extract_slot(&digest), Some(5));
        assert_eq!(index_of(resolve_author(&digest, &validators(3))), Some(2));
    }

    #[test]
    fn test_empty_digest() {
        let digest = Digest::default();
        assert_eq!(extract_slot(&digest), None);
        assert_eq!(resolve_author(&digest, &validators(3)), None);
    }

    #[test]
    fn test_seal_fallback() {
        let digest = Digest::new(vec![DigestItem::RuntimeEnvironmentUpdated, seal(7)]);
        assert_eq!(extract_slot(&digest), Some(7));
        assert_eq!(index_of(resolve_author(&digest, &validators(4))), Some(3));
    }

    #[test]
    fn test_empty_validator_set() {
        let digest = Digest::new(vec![aura(5)]);
        assert_eq!(extract_slot(&digest), Some(5));
        assert_eq!(resolve_author(&digest, &ValidatorSet::default()), None);
    }

    #[test]
    fn test_unknown_consensus_suppresses_seal() {
        let digest = Digest::new(vec![grandpa(), seal(7)]);
        assert_eq!(extract_slot(&digest), None);
        assert_eq!(resolve_author(&digest, &validators(4)), None);
    }

    #[test]
    fn test_consensus_order_matters() {
        let set = validators(4);
        let aura_first = Digest::new(vec![aura(1), grandpa()]);
        let grandpa_first = Digest::new(vec![grandpa(), aura(1)]);
        assert_eq!(index_of(resolve_author(&aura_first, &set)), Some(1));
        assert_eq!(resolve_author(&grandpa_first, &set), None);
    }

    #[test]
    fn test_swapping_aura_entries_changes_author() {
        let set = validators(4);
        let forward = Digest::new(vec![aura(1), aura(2)]);
        let reversed = Digest::new(vec![aura(2), aura(1)]);
        assert_eq!(index_of(resolve_author(&forward, &set)), Some(1));
        assert_eq!(index_of(resolve_author(&reversed, &set)), Some(2));
        assert_ne!(resolve_author(&forward, &set), resolve_author(&reversed, &set));
    }

    #[test]
    fn test_max_slot() {
        let digest = Digest::new(vec![aura(u64::MAX)]);
        assert_eq!(index_of(resolve_author(&digest, &validators(4))), Some(3));
    }

    #[test]
    fn test_only_first_consensus_inspected() {
        let digest = Digest::new(vec![aura(2), aura(3)]);
        assert_eq!(extract_slot(&digest), Some(2));
    }

    #[test]
    fn test_consensus_takes_precedence_over_seal() {
        let digest = Digest::new(vec![seal(7), aura(1)]);
        assert_eq!(extract_slot(&digest), Some(1));
    }

    #[test]
    fn test_short_aura_payload_is_opaque() {
        let item = DigestItem::Consensus(EngineId::AURA, Payload::new(vec![5, 0, 0]).unwrap());
        let digest = Digest::new(vec![item, seal(7)]);
        assert_eq!(extract_slot(&digest), None);
    }

    #[test]
    fn test_short_seal() {
        let item = DigestItem::Seal(EngineId::AURA, Payload::new(vec![1, 2, 3]).unwrap());
        assert_eq!(extract_slot(&Digest::new(vec![item])), None);
    }

    #[test]
    fn test_pre_runtime_ignored() {
        let item = DigestItem::PreRuntime(EngineId::AURA, Payload::new(9u64.to_le_bytes().to_vec()).unwrap());
        assert_eq!(extract_slot(&Digest::new(vec![item])), None);
    }

    proptest! {
        #[test]
        fn test_author_is_slot_mod_len(slot in any::<u64>(), count in 1u8..=32) {
            let digest = Digest::new(vec![aura(slot)]);
            let expected = (slot % u64::from(count)) as u8;
            prop_assert_eq!(index_of(resolve_author(&digest, &validators(count))), Some(expected));
        }
    }
}
