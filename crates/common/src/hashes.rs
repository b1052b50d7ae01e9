//! Hash types and the BLAKE2b-256 hash primitive.

use blake2::{Blake2b, Digest as _, digest::consts::U32};
use parity_scale_codec::Output;

use crate::consensus::EncodeDecodeError;

/// A 256-bit hash, such as a block hash or a state/extrinsics root.
///
/// Serializes as a `0x`-prefixed lowercase hex string and SCALE-encodes as
/// its 32 raw bytes.
pub type Hash = primitive_types::H256;

/// BLAKE2b with a 256-bit output.
type Blake2b256 = Blake2b<U32>;

/// Copies a hash out of a slice of exactly 32 bytes.
///
/// # Errors
///
/// * `InvalidLength` - When the slice has any other length
pub fn hash_from_slice(bytes: &[u8]) -> Result<Hash, EncodeDecodeError> {
    <[u8; 32]>::try_from(bytes)
        .map(Hash::from)
        .map_err(|_| EncodeDecodeError::InvalidLength {
            expected: Hash::len_bytes(),
            actual: bytes.len(),
        })
}

/// Hashes `data` with BLAKE2b-256.
pub fn blake2_256(data: &[u8]) -> Hash {
    let mut engine = HashEngine::new();
    engine.input(data);
    engine.finalize()
}

/// Incremental BLAKE2b-256 hasher.
///
/// Implements the codec's [`Output`] so that any encodable value can be
/// hashed with `encode_to`, without materializing the encoding first.
#[derive(Clone, Default)]
pub struct HashEngine(Blake2b256);

impl HashEngine {
    /// Creates an engine with no input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds bytes into the hash.
    pub fn input(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    /// Consumes the engine and returns the hash of everything written.
    pub fn finalize(self) -> Hash {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0.finalize());
        Hash::from(out)
    }
}

impl Output for HashEngine {
    fn write(&mut self, bytes: &[u8]) {
        self.input(bytes);
    }
}
