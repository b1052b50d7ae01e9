//! Consensus encoding and decoding.
//!
//! Headers travel in the SCALE format: little-endian fixed-width integers,
//! compact-prefixed lengths, and structs encoded field by field in declaration
//! order. Types derive [`Encode`] and [`Decode`] from `parity-scale-codec`;
//! this module adds the slice helpers and the error type used across the
//! crate.

mod error;

pub use error::Error;
pub use error::Error as EncodeDecodeError;
pub use parity_scale_codec::{Compact, Decode, Encode};

/// Maximum size, in bytes, of a digest item payload.
///
/// Decoding refuses to allocate past this bound regardless of what a length
/// prefix claims.
pub const MAX_VEC_SIZE: usize = 4_000_000;

/// Decodes an object from a byte slice, requiring every byte to be consumed.
///
/// # Errors
///
/// * [`EncodeDecodeError::Codec`] - When `T` can't be decoded from the input
/// * [`EncodeDecodeError::TrailingData`] - When bytes remain after the object
pub fn deserialize<T: Decode>(data: &[u8]) -> Result<T, EncodeDecodeError> {
    let (value, consumed) = deserialize_partial(data)?;
    let trailing = data.len().saturating_sub(consumed);
    if trailing == 0 {
        Ok(value)
    } else {
        Err(EncodeDecodeError::TrailingData(trailing))
    }
}

/// Decodes an object from the start of a byte slice.
///
/// # Returns
///
/// The decoded object and the number of bytes it occupied.
pub fn deserialize_partial<T: Decode>(data: &[u8]) -> Result<(T, usize), EncodeDecodeError> {
    let mut input = data;
    let value = T::decode(&mut input)?;
    Ok((value, data.len().saturating_sub(input.len())))
}
