use thiserror::Error;

/// Errors raised while encoding or decoding consensus data.
#[derive(Debug, Error)]
pub enum Error {
    /// The input was truncated, carried a malformed or non-canonical compact
    /// integer, or named a digest item tag no variant is assigned to.
    #[error("SCALE decoding failed: {0}")]
    Codec(#[from] parity_scale_codec::Error),

    /// A payload exceeded the allocation bound.
    #[error("Vector too large: {size} (max: {max})")]
    OversizedVec {
        /// Length of the supplied payload.
        size: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// A fixed-width field was built from input of another width.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Width of the field.
        expected: usize,
        /// Width of the supplied input.
        actual: usize,
    },

    /// Bytes remained after a complete object was decoded.
    #[error("Data not consumed entirely: {0} trailing bytes")]
    TrailingData(usize),

    /// Input was not valid hex.
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
