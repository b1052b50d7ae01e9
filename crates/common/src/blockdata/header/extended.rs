use serde::Serialize;
use tracing::debug;

use crate::{
    author::resolve_author,
    blockdata::header::Header,
    hashes::Hash,
    validator::{AccountId, ValidatorSet},
};

/// A header paired with the account that authored it.
///
/// The author is resolved once, at construction, against the validator set
/// that was active for the block. It is `None` when the digest carries no
/// usable slot or the validator set is empty.
///
/// Serializes as the header's own fields plus an `author` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderExtended {
    #[serde(flatten)]
    header: Header,
    author: Option<AccountId>,
}

impl HeaderExtended {
    pub fn new(header: Header, validators: &ValidatorSet) -> Self {
        let author = resolve_author(header.digest(), validators).copied();
        debug!(
            number = header.number(),
            validators = validators.len(),
            author = ?author,
            "Resolved block author"
        );
        HeaderExtended { header, author }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn author(&self) -> Option<&AccountId> {
        self.author.as_ref()
    }

    /// Hash of the wrapped header. The author does not contribute to it.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn into_parts(self) -> (Header, Option<AccountId>) {
        (self.header, self.author)
    }
}

impl AsRef<Header> for HeaderExtended {
    fn as_ref(&self) -> &Header {
        &self.header
    }
}

impl From<HeaderExtended> for Header {
    fn from(extended: HeaderExtended) -> Self {
        extended.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockdata::{
        digest::{Digest, DigestItem, EngineId, Payload},
        header::tests::{AURA_HEADER_HEX, BABE_HEADER_HEX, aura_consensus},
    };

    fn validators(count: u8) -> ValidatorSet {
        (0..count).map(|i| AccountId::from_byte_array([i; 32])).collect()
    }

    #[test]
    fn test_aura_author() {
        let header = Header::from_hex(AURA_HEADER_HEX).unwrap();
        let extended = HeaderExtended::new(header.clone(), &validators(3));

        // Slot 5 over three validators
        assert_eq!(extended.author(), Some(&AccountId::from_byte_array([2; 32])));
        assert_eq!(extended.header(), &header);
        assert_eq!(extended.hash(), header.hash());
    }

    #[test]
    fn test_babe_header_falls_back_to_seal() {
        // Pre-runtime items are not consulted, so with no consensus item the
        // leading bytes of the seal are read as the slot.
        let header = Header::from_hex(BABE_HEADER_HEX).unwrap();
        let seal_slot = header
            .digest()
            .first_seal()
            .and_then(DigestItem::as_seal)
            .map(|seal| seal.slot())
            .unwrap();
        let extended = HeaderExtended::new(header, &validators(7));
        let expected = AccountId::from_byte_array([(seal_slot % 7) as u8; 32]);
        assert_eq!(extended.author(), Some(&expected));
    }

    #[test]
    fn test_empty_validator_set() {
        let header = Header::from_hex(AURA_HEADER_HEX).unwrap();
        let extended = HeaderExtended::new(header, &ValidatorSet::default());
        assert_eq!(extended.author(), None);
    }

    #[test]
    fn test_into_parts() {
        let header = Header::from_hex(AURA_HEADER_HEX).unwrap();
        let (inner, author) = HeaderExtended::new(header.clone(), &validators(1)).into_parts();
        assert_eq!(inner, header);
        assert_eq!(author, Some(AccountId::from_byte_array([0; 32])));
    }

    #[test]
    fn test_extended_json() {
        let header = Header::new(
            Hash::default(),
            9,
            Hash::default(),
            Hash::default(),
            Digest::new(vec![DigestItem::Other(Payload::default())]),
        );
        let json = serde_json::to_value(HeaderExtended::new(header, &validators(2))).unwrap();
        let zero = format!("0x{}", "00".repeat(32));
        assert_eq!(
            json,
            serde_json::json!({
                "parentHash": zero,
                "number": 9,
                "stateRoot": zero,
                "extrinsicsRoot": zero,
                "digest": { "logs": [{ "other": "0x" }] },
                "author": null
            })
        );

        let header = Header::new(
            Hash::default(),
            9,
            Hash::default(),
            Hash::default(),
            Digest::new(vec![aura_consensus(3)]),
        );
        let json = serde_json::to_value(HeaderExtended::new(header, &validators(2))).unwrap();
        assert_eq!(json["author"], serde_json::json!(format!("0x{}", "01".repeat(32))));
    }

    #[test]
    fn test_unknown_engine_blocks_seal_fallback() {
        let header = Header::new(
            Hash::default(),
            1,
            Hash::default(),
            Hash::default(),
            Digest::new(vec![
                DigestItem::Consensus(EngineId::GRANDPA, Payload::new(vec![0; 8]).unwrap()),
                DigestItem::Seal(EngineId::AURA, Payload::new(vec![1; 72]).unwrap()),
            ]),
        );
        assert_eq!(HeaderExtended::new(header, &validators(4)).author(), None);
    }
}
