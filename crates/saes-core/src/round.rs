//! Round transformations over the 4×4 state.

use crate::gf256::gf_mul;
use crate::sbox::SBox;
use crate::state::{State, STATE_DIM};

/// Column-mixing matrix, first row [2, 3, 1, 1] rotated right per row.
const MIX_MATRIX: [[u8; STATE_DIM]; STATE_DIM] = [
    [2, 3, 1, 1],
    [1, 2, 3, 1],
    [1, 1, 2, 3],
    [3, 1, 1, 2],
];

/// Inverse column-mixing matrix, first row [14, 11, 13, 9] rotated right per
/// row. Multiplicative inverse of `MIX_MATRIX` under the column product.
const INV_MIX_MATRIX: [[u8; STATE_DIM]; STATE_DIM] = [
    [14, 11, 13, 9],
    [9, 14, 11, 13],
    [13, 9, 14, 11],
    [11, 13, 9, 14],
];

/// Replaces every state entry through the forward substitution box.
#[inline]
pub fn sub_bytes(state: &mut State, sbox: &SBox) {
    for row in 0..STATE_DIM {
        for column in 0..STATE_DIM {
            state[(row, column)] = sbox.forward(state[(row, column)]);
        }
    }
}

/// Replaces every state entry through the inverse substitution box.
#[inline]
pub fn inv_sub_bytes(state: &mut State, sbox: &SBox) {
    for row in 0..STATE_DIM {
        for column in 0..STATE_DIM {
            state[(row, column)] = sbox.inverse(state[(row, column)]);
        }
    }
}

/// Rotates row `r` left by `r` positions; row 0 stays put.
pub fn shift_rows(state: &mut State) {
    let source = *state;
    for row in 1..STATE_DIM {
        for column in 0..STATE_DIM {
            state[(row, column)] = source[(row, (column + row) % STATE_DIM)];
        }
    }
}

/// Rotates row `r` right by `r` positions, undoing [`shift_rows`].
pub fn inv_shift_rows(state: &mut State) {
    let source = *state;
    for row in 1..STATE_DIM {
        for column in 0..STATE_DIM {
            state[(row, column)] = source[(row, (column + STATE_DIM - row) % STATE_DIM)];
        }
    }
}

fn mix_with(state: &mut State, matrix: &[[u8; STATE_DIM]; STATE_DIM]) {
    let source = *state;
    for column in 0..STATE_DIM {
        for row in 0..STATE_DIM {
            let mut mixed = 0u8;
            for term in 0..STATE_DIM {
                mixed ^= gf_mul(matrix[row][term], source[(term, column)]);
            }
            state[(row, column)] = mixed;
        }
    }
}

/// Multiplies every column by the fixed mixing matrix over GF(256).
pub fn mix_columns(state: &mut State) {
    mix_with(state, &MIX_MATRIX);
}

/// Multiplies every column by the inverse mixing matrix, undoing
/// [`mix_columns`].
pub fn inv_mix_columns(state: &mut State) {
    mix_with(state, &INV_MIX_MATRIX);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut State, round_key: &State) {
    state.xor_assign(round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BLOCK_LENGTH;

    fn sample_blocks() -> Vec<Vec<u8>> {
        vec![
            vec![],
            vec![0],
            vec![1],
            vec![1, 255],
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
            vec![1, 2, 4, 8, 16, 32, 64, 128, 128, 64, 32, 16, 8, 4, 2, 1],
            vec![255, 127, 63, 31, 15, 7, 3, 1, 1, 3, 7, 15, 31, 63, 127, 255],
            vec![10, 0, 98, 111, 209, 74, 55, 32, 255, 43, 12, 84, 163, 201, 192, 15],
        ]
    }

    #[test]
    fn shift_rows_rotates_each_row_by_its_index() {
        for block in sample_blocks() {
            let initial = State::from_bytes(&block).unwrap();
            let mut shifted = initial;
            shift_rows(&mut shifted);
            for row in 0..STATE_DIM {
                for column in 0..STATE_DIM {
                    assert_eq!(
                        initial[(row, (column + row) % STATE_DIM)],
                        shifted[(row, column)]
                    );
                }
            }
        }
    }

    #[test]
    fn shift_rows_round_trips() {
        for block in sample_blocks() {
            let initial = State::from_bytes(&block).unwrap();
            let mut state = initial;
            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            assert_eq!(initial, state);
        }
    }

    #[test]
    fn mix_columns_round_trips() {
        for block in sample_blocks() {
            let initial = State::from_bytes(&block).unwrap();
            let mut state = initial;
            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(initial, state);
        }
    }

    #[test]
    fn mix_matrices_multiply_to_identity() {
        for row in 0..STATE_DIM {
            for column in 0..STATE_DIM {
                let mut entry = 0u8;
                for term in 0..STATE_DIM {
                    entry ^= gf_mul(MIX_MATRIX[row][term], INV_MIX_MATRIX[term][column]);
                }
                assert_eq!(u8::from(row == column), entry);
            }
        }
    }

    #[test]
    fn sub_bytes_round_trips() {
        let sbox = SBox::from_seed(1);
        for block in sample_blocks() {
            let initial = State::from_bytes(&block).unwrap();
            let mut state = initial;
            sub_bytes(&mut state, &sbox);
            inv_sub_bytes(&mut state, &sbox);
            assert_eq!(initial, state);
        }
    }

    #[test]
    fn add_round_key_is_self_inverse() {
        let key = State::from_bytes(&[
            1, 200, 19, 176, 106, 8, 231, 203, 2, 9, 14, 153, 21, 16, 19, 1,
        ])
        .unwrap();
        let initial = State::from_bytes(&[0x5a; BLOCK_LENGTH]).unwrap();
        let mut state = initial;
        add_round_key(&mut state, &key);
        assert_ne!(initial, state);
        add_round_key(&mut state, &key);
        assert_eq!(initial, state);
    }
}
