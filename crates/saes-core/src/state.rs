//! The 4×4 byte state holding one cipher block.

use core::ops::{Index, IndexMut};

use crate::error::Error;

/// Cipher block length in bytes.
pub const BLOCK_LENGTH: usize = 16;

/// Rows/columns per state.
pub const STATE_DIM: usize = 4;

/// One 16-byte block arranged as a 4×4 byte matrix.
///
/// Flat byte sequences fill the matrix column by column: byte `i` lands at row
/// `i % 4`, column `i / 4`. Serialization through [`State::to_plain_bytes`]
/// reverses the mapping exactly. Round keys use the same representation, and
/// round-key addition is the entrywise XOR of two states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct State {
    bytes: [[u8; STATE_DIM]; STATE_DIM],
}

impl State {
    /// Builds a state from up to 16 bytes, zero-padding short input on the
    /// right. Input longer than one block is rejected.
    pub fn from_bytes(block: &[u8]) -> Result<Self, Error> {
        if block.len() > BLOCK_LENGTH {
            return Err(Error::BlockTooLong(block.len()));
        }
        let mut padded = [0u8; BLOCK_LENGTH];
        padded[..block.len()].copy_from_slice(block);

        let mut bytes = [[0u8; STATE_DIM]; STATE_DIM];
        for (index, &value) in padded.iter().enumerate() {
            bytes[index % STATE_DIM][index / STATE_DIM] = value;
        }
        Ok(Self { bytes })
    }

    /// Serializes the state back to its flat column-major byte order.
    pub fn to_plain_bytes(&self) -> [u8; BLOCK_LENGTH] {
        let mut result = [0u8; BLOCK_LENGTH];
        for (index, value) in result.iter_mut().enumerate() {
            *value = self.bytes[index % STATE_DIM][index / STATE_DIM];
        }
        result
    }

    /// Entrywise XOR, the round-key-addition operator.
    pub fn xor_assign(&mut self, rhs: &State) {
        for (row, rhs_row) in self.bytes.iter_mut().zip(rhs.bytes.iter()) {
            for (entry, &rhs_entry) in row.iter_mut().zip(rhs_row.iter()) {
                *entry ^= rhs_entry;
            }
        }
    }
}

impl Index<(usize, usize)> for State {
    type Output = u8;

    fn index(&self, (row, column): (usize, usize)) -> &u8 {
        &self.bytes[row][column]
    }
}

impl IndexMut<(usize, usize)> for State {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut u8 {
        &mut self.bytes[row][column]
    }
}
