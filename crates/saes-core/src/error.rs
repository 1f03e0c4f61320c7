//! Construction and contract errors for the cipher core.

use thiserror::Error;

/// Errors reported by cipher construction and block-level operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The raw key's bit length does not match the selected parameter pair.
    #[error("key must be {expected} bits long, got {actual}")]
    KeyLength {
        /// Bit length required by the key-size parameters.
        expected: usize,
        /// Bit length of the supplied key material.
        actual: usize,
    },

    /// The requested key size is not one of 128, 192, or 256 bits.
    #[error("unsupported key length of {0} bits")]
    UnsupportedKeyBits(usize),

    /// A block longer than 16 bytes was passed to a block-level operation.
    #[error("block of {0} bytes exceeds the 16-byte block length")]
    BlockTooLong(usize),
}
