//! Block-chaining stream driver for the `saes-core` cipher.
//!
//! Turns single-block encryption into whole-stream encryption over
//! `std::io::Read`/`std::io::Write` pairs, batched for I/O efficiency, in ECB,
//! CBC, OFB, and CFB modes. The feedback modes use the standard keystream and
//! ciphertext-feedback constructions with an implicit all-zero IV.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod error;
mod mode;

pub use crate::driver::StreamCipher;
pub use crate::error::Error;
pub use crate::mode::ChainMode;
