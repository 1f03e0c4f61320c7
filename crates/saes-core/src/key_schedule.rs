//! Key-size parameters and Rijndael-style key expansion.

use crate::error::Error;
use crate::sbox::SBox;
use crate::state::{State, BLOCK_LENGTH, STATE_DIM};

/// Bits per expansion word.
const WORD_BITS: usize = 32;

/// The three recognized key-size/round-count parameter pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Key length in bits.
    pub const fn key_bits(self) -> usize {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        self.key_bits() / 8
    }

    /// Number of cipher rounds for this key size.
    pub const fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }

    /// Selects the parameter pair for a key bit length.
    pub fn from_bits(bits: usize) -> Result<Self, Error> {
        match bits {
            128 => Ok(Self::Aes128),
            192 => Ok(Self::Aes192),
            256 => Ok(Self::Aes256),
            other => Err(Error::UnsupportedKeyBits(other)),
        }
    }
}

/// Expands raw key material into `rounds + 1` round-key states.
///
/// The first `keyBits / 32` words are packed straight from the key, most
/// significant byte first. Every word at a group boundary mixes in the
/// transformed previous word; all others XOR the previous word with the word
/// one group back. Each run of four words becomes one round key, one word per
/// column.
pub fn expand_key(key: &[u8], size: KeySize, sbox: &SBox) -> Result<Vec<State>, Error> {
    let expected_bits = size.key_bits();
    if key.len() * 8 != expected_bits {
        return Err(Error::KeyLength {
            expected: expected_bits,
            actual: key.len() * 8,
        });
    }

    let group_length = expected_bits / WORD_BITS;
    let word_count = STATE_DIM * (size.rounds() + 1);

    let mut words = Vec::with_capacity(word_count);
    for chunk in key.chunks_exact(4) {
        words.push(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    let mut round_index = 0u32;
    for i in group_length..word_count {
        let word = if i % group_length == 0 {
            round_index += 1;
            words[i - group_length] ^ transform_word(words[i - 1], round_index, sbox)
        } else {
            words[i - 1] ^ words[i - group_length]
        };
        words.push(word);
    }

    let mut round_keys = Vec::with_capacity(size.rounds() + 1);
    for quad in words.chunks_exact(STATE_DIM) {
        let mut flat = [0u8; BLOCK_LENGTH];
        for (column, word) in quad.iter().enumerate() {
            flat[column * 4..column * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        round_keys.push(State::from_bytes(&flat)?);
    }
    Ok(round_keys)
}

/// Boundary-word transform: rotate the bytes left by one, substitute each
/// through the forward box, then XOR the leading byte with the round constant
/// `1 << round_index` truncated to a byte.
fn transform_word(word: u32, round_index: u32, sbox: &SBox) -> u32 {
    let mut bytes = word.rotate_left(8).to_be_bytes();
    for byte in &mut bytes {
        *byte = sbox.forward(*byte);
    }
    bytes[0] ^= (1u32 << round_index) as u8;
    u32::from_be_bytes(bytes)
}
