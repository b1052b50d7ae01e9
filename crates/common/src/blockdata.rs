//! Block data structures.

pub mod digest;
pub mod header;

pub use digest::{Digest, DigestItem, DigestItemKind, EngineId, Payload};
pub use header::{BlockNumber, Header, HeaderExtended};
