//! Block header codec, digest model and author resolution.
//!
//! This library decodes and encodes SCALE block headers, computes their
//! BLAKE2b-256 hash, and resolves the validator that authored a block from
//! the slot recorded in its digest.

#![cfg_attr(test, allow(clippy::arithmetic_side_effects))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::cast_sign_loss))]
#![cfg_attr(test, allow(clippy::indexing_slicing))]
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::cast_possible_truncation))]

/// Block author resolution from digest slots.
pub mod author;
/// Headers and digests.
pub mod blockdata;
/// Consensus encoding traits and helpers.
pub mod consensus;
/// Hash types and the hash primitive.
pub mod hashes;
/// Validator accounts and sets.
pub mod validator;

pub use author::{extract_slot, resolve_author};
pub use blockdata::{Digest, DigestItem, EngineId, Header, HeaderExtended, Payload};
pub use consensus::EncodeDecodeError;
pub use hashes::{Hash, blake2_256, hash_from_slice};
pub use validator::{AccountId, ValidatorSet};

/// Library version, reported by `header-inspect --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
