//! Legacy seal payloads.

use crate::consensus::{Decode, EncodeDecodeError};

/// Seal in the layout used before consensus logs existed: the authoring slot
/// as a little-endian `u64`, followed by the author's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealPayload<'a> {
    slot: u64,
    signature: &'a [u8],
}

impl<'a> SealPayload<'a> {
    /// Splits seal bytes into slot and signature.
    ///
    /// # Errors
    ///
    /// * `Codec` - When `data` is shorter than 8 bytes
    pub fn decode(data: &'a [u8]) -> Result<Self, EncodeDecodeError> {
        let mut signature = data;
        let slot = u64::decode(&mut signature)?;
        Ok(SealPayload { slot, signature })
    }

    /// Slot the block was sealed in.
    pub fn slot(&self) -> u64 {
        self.slot
    }

    /// Signature bytes following the slot. Not verified.
    pub fn signature(&self) -> &'a [u8] {
        self.signature
    }
}
