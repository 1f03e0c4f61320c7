//! Errors for the chaining driver.

use thiserror::Error;

/// Errors reported by stream construction and stream-level operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The chain-mode name is not one of ECB, CBC, OFB, or CFB.
    #[error("unrecognized block chain mode {0:?}")]
    UnknownChainMode(String),

    /// A batch size of zero blocks would never make I/O progress.
    #[error("batch size must be at least one block")]
    ZeroBatchSize,

    /// Cipher construction or block-level failure.
    #[error(transparent)]
    Cipher(#[from] saes_core::Error),

    /// Failure reading the input stream or writing the output stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
