//! Seed-derived substitution box.
//!
//! The forward box is a uniformly random permutation of the byte values, drawn
//! from a ChaCha20 generator seeded with the cipher seed, with every drawn byte
//! passed through an affine transformation over GF(256): multiplicative
//! inverse, multiply by x^4 + x^3 + x^2 + x + 1, add x^6 + x^5 + x + 1. The
//! inverse box is the positional inverse of the forward permutation; no affine
//! step is applied in the inverse direction.
//!
//! The seed→permutation mapping is fixed by the choice of generator and draw
//! order; two instances built from the same seed always agree.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::gf256::Gf256Poly;

/// Affine multiplier x^4 + x^3 + x^2 + x + 1.
const AFFINE_MULTIPLIER: Gf256Poly = Gf256Poly::new(0b0001_1111);

/// Affine addend x^6 + x^5 + x + 1.
const AFFINE_ADDEND: Gf256Poly = Gf256Poly::new(0b0110_0011);

/// Forward and inverse byte substitution tables.
///
/// Both tables are full permutations of the 256 byte values and are mutual
/// inverses; they are built once per cipher instance and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SBox {
    forward: [u8; 256],
    inverse: [u8; 256],
}

impl SBox {
    /// Builds the forward and inverse boxes for the given seed.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut pool: Vec<u8> = (0..=255).collect();

        let mut forward = [0u8; 256];
        for entry in forward.iter_mut() {
            let index = rng.gen_range(0..pool.len());
            *entry = affine_transformation(pool.remove(index));
        }

        let mut inverse = [0u8; 256];
        for (position, &substituted) in forward.iter().enumerate() {
            inverse[substituted as usize] = position as u8;
        }

        Self { forward, inverse }
    }

    /// Forward substitution of one byte.
    #[inline]
    pub fn forward(&self, value: u8) -> u8 {
        self.forward[value as usize]
    }

    /// Inverse substitution of one byte.
    #[inline]
    pub fn inverse(&self, value: u8) -> u8 {
        self.inverse[value as usize]
    }
}

/// Affine step applied to every drawn byte: inverse, multiply, add.
fn affine_transformation(value: u8) -> u8 {
    let inverse = Gf256Poly::from(value).multiplicative_inverse();
    (inverse * AFFINE_MULTIPLIER + AFFINE_ADDEND).coefficients() as u8
}
