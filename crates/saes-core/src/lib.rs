//! From-first-principles AES-family block cipher with a seed-derived S-box.
//!
//! This crate implements the cipher engine proper:
//! - GF(256) polynomial arithmetic (XOR addition, modular multiplication and
//!   division, extended Euclidean inverse).
//! - A substitution box derived deterministically from a numeric seed, which
//!   intentionally differs from the fixed FIPS-197 S-box.
//! - The 4×4 state, the Rijndael round transformations, and the key schedule
//!   for 128/192/256-bit keys.
//! - Single-block encryption and decryption.
//!
//! Stream-level chaining modes live in the companion `saes-stream` crate. The
//! implementation aims for transparency and testability, not constant-time
//! guarantees or standards compliance; it must not be used where an audited
//! AES library is required.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
pub mod gf256;
mod key_schedule;
mod round;
mod sbox;
mod state;

pub use crate::cipher::SeededAes;
pub use crate::error::Error;
pub use crate::key_schedule::{expand_key, KeySize};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
pub use crate::sbox::SBox;
pub use crate::state::{State, BLOCK_LENGTH};
