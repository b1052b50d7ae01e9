//! Block header.
//!
//! The header is encoded as its fields in a fixed order with no padding or
//! framing between them:
//!
//! ```text
//! parent_hash       32 bytes
//! number            compact integer
//! state_root        32 bytes
//! extrinsics_root   32 bytes
//! digest            compact item count, then the items
//! ```
//!
//! The block hash is the BLAKE2b-256 hash of that encoding, so two headers
//! with the same field values always hash the same, however they were built.

mod extended;

pub use extended::HeaderExtended;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    blockdata::digest::Digest,
    consensus::{self, Decode, Encode, EncodeDecodeError},
    hashes::{Hash, HashEngine},
};

/// Height of a block in the chain.
pub type BlockNumber = u64;

/// A block header.
///
/// Headers are immutable once built: fields are only reachable through
/// accessors. [`Header::default`] is the all-zero header with an empty
/// digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Hash of the parent block's header.
    parent_hash: Hash,

    /// Block height, compact-encoded on the wire.
    #[codec(compact)]
    number: BlockNumber,

    /// Root of the state trie after executing the block.
    state_root: Hash,

    /// Root of the trie of the block's extrinsics.
    extrinsics_root: Hash,

    /// Digest logs, in the order they were produced.
    digest: Digest,
}

impl Header {
    /// Creates a header from its fields.
    pub fn new(
        parent_hash: Hash,
        number: BlockNumber,
        state_root: Hash,
        extrinsics_root: Hash,
        digest: Digest,
    ) -> Self {
        Header {
            parent_hash,
            number,
            state_root,
            extrinsics_root,
            digest,
        }
    }

    /// Decodes a header that spans the whole of `bytes`.
    ///
    /// # Errors
    ///
    /// * `Codec` - When the input ends inside a field, the block number or a
    ///   length prefix is malformed, a digest item has an unknown tag, or a
    ///   payload exceeds the allocation bound
    /// * `TrailingData` - When bytes remain after the digest
    pub fn decode(bytes: &[u8]) -> Result<Self, EncodeDecodeError> {
        let header: Header = consensus::deserialize(bytes)?;
        trace!(
            number = header.number,
            digest_items = header.digest.len(),
            "Decoded header"
        );
        Ok(header)
    }

    /// Decodes a header from the start of `bytes`.
    ///
    /// # Returns
    ///
    /// The header and the number of bytes it occupied.
    pub fn decode_partial(bytes: &[u8]) -> Result<(Self, usize), EncodeDecodeError> {
        consensus::deserialize_partial(bytes)
    }

    /// Decodes a hex-encoded header, with or without a `0x` prefix.
    pub fn from_hex(hex: &str) -> Result<Self, EncodeDecodeError> {
        let digits = hex.trim().strip_prefix("0x").unwrap_or(hex.trim());
        Self::decode(&hex::decode(digits)?)
    }

    /// Encodes the header.
    ///
    /// The output decodes back to an equal header with [`Header::decode`].
    pub fn encode(&self) -> Vec<u8> {
        Encode::encode(self)
    }

    /// Computes the block hash: BLAKE2b-256 of the encoded header.
    pub fn hash(&self) -> Hash {
        let mut engine = HashEngine::new();
        self.encode_to(&mut engine);
        engine.finalize()
    }

    pub fn parent_hash(&self) -> &Hash {
        &self.parent_hash
    }

    pub fn number(&self) -> BlockNumber {
        self.number
    }

    /// Alias for [`Header::number`].
    pub fn block_number(&self) -> BlockNumber {
        self.number
    }

    pub fn state_root(&self) -> &Hash {
        &self.state_root
    }

    pub fn extrinsics_root(&self) -> &Hash {
        &self.extrinsics_root
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }
}
