//! Single-block encryption and decryption.

use crate::error::Error;
use crate::key_schedule::{expand_key, KeySize};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::SBox;
use crate::state::{State, BLOCK_LENGTH};

/// AES-family block cipher with a seed-derived substitution box.
///
/// The substitution boxes and the round-key sequence are built once at
/// construction and are read-only afterwards, so one instance can serve any
/// number of block operations.
#[derive(Clone, Debug)]
pub struct SeededAes {
    sbox: SBox,
    round_keys: Vec<State>,
    rounds: usize,
}

impl SeededAes {
    /// Builds a cipher instance from an S-box seed, a key-size parameter pair,
    /// and raw key material whose bit length must match the parameters.
    pub fn new(seed: u64, size: KeySize, key: &[u8]) -> Result<Self, Error> {
        let sbox = SBox::from_seed(seed);
        let round_keys = expand_key(key, size, &sbox)?;
        Ok(Self {
            sbox,
            round_keys,
            rounds: size.rounds(),
        })
    }

    /// Encrypts one block of up to 16 bytes, zero-padding short input.
    ///
    /// Returns the full 16-byte ciphertext block.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<[u8; BLOCK_LENGTH], Error> {
        let mut state = State::from_bytes(block)?;

        add_round_key(&mut state, &self.round_keys[0]);
        for round in 1..self.rounds {
            sub_bytes(&mut state, &self.sbox);
            shift_rows(&mut state);
            mix_columns(&mut state);
            add_round_key(&mut state, &self.round_keys[round]);
        }
        sub_bytes(&mut state, &self.sbox);
        shift_rows(&mut state);
        add_round_key(&mut state, &self.round_keys[self.rounds]);

        Ok(state.to_plain_bytes())
    }

    /// Decrypts one block, consuming the round keys in reverse order.
    ///
    /// For any block `b`, `decrypt_block(encrypt_block(b))` yields `b` padded
    /// with zeros to the full block length.
    pub fn decrypt_block(&self, block: &[u8]) -> Result<[u8; BLOCK_LENGTH], Error> {
        let mut state = State::from_bytes(block)?;

        add_round_key(&mut state, &self.round_keys[self.rounds]);
        for round in (1..self.rounds).rev() {
            inv_shift_rows(&mut state);
            inv_sub_bytes(&mut state, &self.sbox);
            add_round_key(&mut state, &self.round_keys[round]);
            inv_mix_columns(&mut state);
        }
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state, &self.sbox);
        add_round_key(&mut state, &self.round_keys[0]);

        Ok(state.to_plain_bytes())
    }
}
