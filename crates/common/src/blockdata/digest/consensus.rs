//! Consensus log payloads.

use crate::{
    blockdata::digest::EngineId,
    consensus::{Decode, Encode},
};

/// Slot announced by an Aura consensus log.
///
/// Only the leading little-endian slot number is read; whatever follows it in
/// the log is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct AuraSlot {
    pub slot: u64,
}

/// Decoded payload of a [`DigestItem::Consensus`](super::DigestItem::Consensus)
/// item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusPayload<'a> {
    /// Aura log carrying the authoring slot.
    Aura {
        /// Slot the block was authored in.
        slot: u64,
    },
    /// Log of an engine without a known layout, or an Aura log too short to
    /// hold a slot.
    Opaque {
        /// Engine that produced the log.
        engine: EngineId,
        /// Raw log bytes.
        data: &'a [u8],
    },
}

impl<'a> ConsensusPayload<'a> {
    /// Decodes a consensus log produced by `engine`.
    ///
    /// Never fails: anything that can't be interpreted is kept as
    /// [`ConsensusPayload::Opaque`].
    pub fn decode(engine: EngineId, data: &'a [u8]) -> Self {
        if engine == EngineId::AURA {
            let mut input = data;
            if let Ok(AuraSlot { slot }) = AuraSlot::decode(&mut input) {
                return ConsensusPayload::Aura { slot };
            }
        }
        ConsensusPayload::Opaque { engine, data }
    }

    /// Returns `true` for the Aura variant.
    pub fn is_aura(&self) -> bool {
        matches!(self, ConsensusPayload::Aura { .. })
    }

    /// Slot carried by the log, if its layout has one.
    pub fn slot(&self) -> Option<u64> {
        match self {
            ConsensusPayload::Aura { slot } => Some(*slot),
            ConsensusPayload::Opaque { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::deserialize;

    #[test]
    fn test_aura_slot_layout() {
        let slot = AuraSlot { slot: 0x0102 };
        assert_eq!(slot.encode(), vec![0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(deserialize::<AuraSlot>(&slot.encode()).unwrap(), slot);
    }

    #[test]
    fn test_aura_payload() {
        let data = 5u64.to_le_bytes();
        let payload = ConsensusPayload::decode(EngineId::AURA, &data);
        assert_eq!(payload, ConsensusPayload::Aura { slot: 5 });
        assert!(payload.is_aura());
        assert_eq!(payload.slot(), Some(5));
    }

    #[test]
    fn test_aura_payload_with_trailing_bytes() {
        let mut data = 9u64.to_le_bytes().to_vec();
        data.extend_from_slice(&[0xee; 64]);
        assert_eq!(
            ConsensusPayload::decode(EngineId::AURA, &data).slot(),
            Some(9)
        );
    }

    #[test]
    fn test_short_aura_payload_is_opaque() {
        let data = [1u8, 2, 3];
        let payload = ConsensusPayload::decode(EngineId::AURA, &data);
        assert_eq!(
            payload,
            ConsensusPayload::Opaque {
                engine: EngineId::AURA,
                data: &data
            }
        );
        assert_eq!(payload.slot(), None);
    }

    #[test]
    fn test_unknown_engine_is_opaque() {
        let data = 5u64.to_le_bytes();
        let payload = ConsensusPayload::decode(EngineId::BABE, &data);
        assert!(!payload.is_aura());
        assert_eq!(payload.slot(), None);
    }
}
