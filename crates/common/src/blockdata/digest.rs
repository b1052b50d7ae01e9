//! Digest logs attached to a block header.
//!
//! A digest is an ordered list of log items written by the block production
//! pipeline. Each item is tagged with its kind and, for engine-specific kinds,
//! the 4-byte id of the consensus engine that produced it:
//!
//! ```text
//! Other(0):                      compact length, payload
//! Consensus(4) / Seal(5) /
//! PreRuntime(6):                 engine id (4 bytes), compact length, payload
//! RuntimeEnvironmentUpdated(8):  nothing
//! ```
//!
//! The order of items is part of the header's identity: it is hashed, and
//! author resolution picks the first matching item.

mod consensus;
mod seal;

use std::fmt;

pub use consensus::{AuraSlot, ConsensusPayload};
use parity_scale_codec::{Input, decode_vec_with_len};
pub use seal::SealPayload;
use serde::{Deserialize, Serialize};

use crate::consensus::{Compact, Decode, Encode, EncodeDecodeError, MAX_VEC_SIZE};

/// Identifier of the consensus engine that produced a digest item.
///
/// Encoded as its four raw bytes, displayed and serialized as `0x`-prefixed
/// hex.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct EngineId(pub [u8; 4]);

impl EngineId {
    /// Aura, slot-based round-robin authorship.
    pub const AURA: Self = Self(*b"aura");
    /// BABE, slot-based VRF authorship.
    pub const BABE: Self = Self(*b"BABE");
    /// GRANDPA finality gadget.
    pub const GRANDPA: Self = Self(*b"FRNK");
    /// Proof of work.
    pub const POW: Self = Self(*b"pow_");

    /// Returns the id as text when all four bytes are printable ASCII.
    pub fn as_ascii(&self) -> Option<&str> {
        if self.0.iter().all(|b| b.is_ascii_graphic()) {
            std::str::from_utf8(&self.0).ok()
        } else {
            None
        }
    }

    pub const fn from_byte_array(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn as_byte_array(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ascii() {
            Some(ascii) => write!(f, "EngineId({ascii:?})"),
            None => write!(f, "EngineId({self})"),
        }
    }
}

impl Serialize for EngineId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EngineId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        let mut id = [0u8; 4];
        hex::decode_to_slice(digits, &mut id).map_err(serde::de::Error::custom)?;
        Ok(EngineId(id))
    }
}

/// Opaque digest item payload.
///
/// Payloads are capped at [`MAX_VEC_SIZE`] bytes at construction, so any
/// payload held by a digest item encodes without error.
#[derive(Clone, Default, PartialEq, Eq, Hash, Encode)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Wraps payload bytes.
    ///
    /// # Errors
    ///
    /// * [`EncodeDecodeError::OversizedVec`] - When `bytes` is longer than
    ///   [`MAX_VEC_SIZE`]
    pub fn new(bytes: Vec<u8>) -> Result<Self, EncodeDecodeError> {
        if bytes.len() > MAX_VEC_SIZE {
            return Err(EncodeDecodeError::OversizedVec {
                size: bytes.len(),
                max: MAX_VEC_SIZE,
            });
        }
        Ok(Self(bytes))
    }

    /// Returns the payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the payload and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the payload in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for Payload {
    type Error = EncodeDecodeError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for Payload {
    type Error = EncodeDecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload({self})")
    }
}

impl Serialize for Payload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(digits).map_err(serde::de::Error::custom)?;
        Payload::new(bytes).map_err(serde::de::Error::custom)
    }
}

/// Length prefix is checked against [`MAX_VEC_SIZE`] before anything is
/// allocated.
impl Decode for Payload {
    fn decode<I: Input>(input: &mut I) -> Result<Self, parity_scale_codec::Error> {
        let Compact(len) = Compact::<u32>::decode(input)?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        if len > MAX_VEC_SIZE {
            return Err("Digest item payload exceeds MAX_VEC_SIZE".into());
        }
        Ok(Self(decode_vec_with_len(input, len)?))
    }
}

/// Kind of a [`DigestItem`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestItemKind {
    /// See [`DigestItem::Other`].
    Other,
    /// See [`DigestItem::Consensus`].
    Consensus,
    /// See [`DigestItem::Seal`].
    Seal,
    /// See [`DigestItem::PreRuntime`].
    PreRuntime,
    /// See [`DigestItem::RuntimeEnvironmentUpdated`].
    RuntimeEnvironmentUpdated,
}

impl DigestItemKind {
    /// Wire tag of the kind.
    pub const fn tag(self) -> u8 {
        match self {
            DigestItemKind::Other => 0,
            DigestItemKind::Consensus => 4,
            DigestItemKind::Seal => 5,
            DigestItemKind::PreRuntime => 6,
            DigestItemKind::RuntimeEnvironmentUpdated => 8,
        }
    }
}

/// A single digest log entry.
///
/// The codec indices are the wire tags and must stay in step with
/// [`DigestItemKind::tag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DigestItem {
    /// Free-form data with no engine attached.
    #[codec(index = 0)]
    Other(Payload),
    /// Consensus engine message, e.g. an Aura slot announcement.
    #[codec(index = 4)]
    Consensus(EngineId, Payload),
    /// Seal put on the header by the block author. Before consensus logs
    /// existed, seals also carried the authoring slot.
    #[codec(index = 5)]
    Seal(EngineId, Payload),
    /// Data the runtime needs before executing the block.
    #[codec(index = 6)]
    PreRuntime(EngineId, Payload),
    /// Marks a block that changed the runtime code or heap pages.
    #[codec(index = 8)]
    RuntimeEnvironmentUpdated,
}

impl DigestItem {
    /// Returns the kind of the item.
    pub fn kind(&self) -> DigestItemKind {
        match self {
            DigestItem::Other(_) => DigestItemKind::Other,
            DigestItem::Consensus(..) => DigestItemKind::Consensus,
            DigestItem::Seal(..) => DigestItemKind::Seal,
            DigestItem::PreRuntime(..) => DigestItemKind::PreRuntime,
            DigestItem::RuntimeEnvironmentUpdated => DigestItemKind::RuntimeEnvironmentUpdated,
        }
    }

    pub fn is_consensus(&self) -> bool {
        matches!(self, DigestItem::Consensus(..))
    }

    pub fn is_seal(&self) -> bool {
        matches!(self, DigestItem::Seal(..))
    }

    pub fn is_pre_runtime(&self) -> bool {
        matches!(self, DigestItem::PreRuntime(..))
    }

    pub fn is_other(&self) -> bool {
        matches!(self, DigestItem::Other(_))
    }

    pub fn is_runtime_environment_updated(&self) -> bool {
        matches!(self, DigestItem::RuntimeEnvironmentUpdated)
    }

    /// Engine that produced the item, if the kind carries one.
    pub fn engine_id(&self) -> Option<EngineId> {
        match self {
            DigestItem::Consensus(engine, _)
            | DigestItem::Seal(engine, _)
            | DigestItem::PreRuntime(engine, _) => Some(*engine),
            DigestItem::Other(_) | DigestItem::RuntimeEnvironmentUpdated => None,
        }
    }

    /// Raw payload, if the kind carries one.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            DigestItem::Other(payload)
            | DigestItem::Consensus(_, payload)
            | DigestItem::Seal(_, payload)
            | DigestItem::PreRuntime(_, payload) => Some(payload),
            DigestItem::RuntimeEnvironmentUpdated => None,
        }
    }

    /// Decodes the payload of a consensus item.
    ///
    /// # Returns
    ///
    /// * `None` - If the item is not a consensus item
    /// * `Some(ConsensusPayload)` - The decoded payload. Engines without a
    ///   known layout come back as [`ConsensusPayload::Opaque`].
    pub fn as_consensus(&self) -> Option<ConsensusPayload<'_>> {
        match self {
            DigestItem::Consensus(engine, payload) => {
                Some(ConsensusPayload::decode(*engine, payload.as_bytes()))
            }
            _ => None,
        }
    }

    /// Decodes the payload of a seal item using the legacy slot layout.
    ///
    /// # Returns
    ///
    /// * `None` - If the item is not a seal, or its payload is too short to
    ///   hold a slot
    /// * `Some(SealPayload)` - The slot and the remaining signature bytes
    pub fn as_seal(&self) -> Option<SealPayload<'_>> {
        match self {
            DigestItem::Seal(_, payload) => SealPayload::decode(payload.as_bytes()).ok(),
            _ => None,
        }
    }
}

/// Ordered list of digest items.
///
/// Items keep the order they were decoded or constructed in; nothing here
/// sorts, deduplicates or drops them. Encoded as a compact item count
/// followed by the items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub struct Digest {
    logs: Vec<DigestItem>,
}

impl Digest {
    /// Creates a digest from items in the given order.
    pub fn new(logs: Vec<DigestItem>) -> Self {
        Self { logs }
    }

    /// Items in stored order.
    pub fn logs(&self) -> &[DigestItem] {
        &self.logs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DigestItem> {
        self.logs.iter()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Items of the given kind, in stored order.
    pub fn logs_with(&self, kind: DigestItemKind) -> impl Iterator<Item = &DigestItem> + '_ {
        self.logs.iter().filter(move |item| item.kind() == kind)
    }

    /// First consensus item in stored order.
    pub fn first_consensus(&self) -> Option<&DigestItem> {
        self.logs.iter().find(|item| item.is_consensus())
    }

    /// First seal item in stored order.
    pub fn first_seal(&self) -> Option<&DigestItem> {
        self.logs.iter().find(|item| item.is_seal())
    }

    /// Consumes the digest and returns its items.
    pub fn into_logs(self) -> Vec<DigestItem> {
        self.logs
    }
}

impl From<Vec<DigestItem>> for Digest {
    fn from(logs: Vec<DigestItem>) -> Self {
        Self::new(logs)
    }
}

impl FromIterator<DigestItem> for Digest {
    fn from_iter<I: IntoIterator<Item = DigestItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Digest {
    type Item = &'a DigestItem;
    type IntoIter = std::slice::Iter<'a, DigestItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.logs.iter()
    }
}
