//! Polynomial arithmetic over GF(2)[x] reduced modulo x^8 + x^4 + x^3 + x + 1.
//!
//! Field elements are bytes interpreted as degree-≤7 polynomials, one
//! coefficient per bit. Intermediate results of multiplication and division may
//! exceed eight significant bits and are folded back into field range before
//! they are returned.

use core::fmt;
use core::ops::{Add, Div, Mul, Rem, Shl, Shr};

/// Values above this border carry more than eight significant bits and must be
/// reduced modulo `MODULUS` before they count as field elements.
const FIELD_BORDER: u32 = 0xff;

/// The irreducible modulus m(x) = x^8 + x^4 + x^3 + x + 1.
pub const MODULUS: Gf256Poly = Gf256Poly(283);

/// A polynomial over GF(2) with one coefficient bit per bit of the backing
/// integer. Wide enough to hold the raw double-width product of two field
/// elements before reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gf256Poly(u32);

impl Gf256Poly {
    /// The zero polynomial.
    pub const ZERO: Self = Self(0);
    /// The multiplicative identity.
    pub const ONE: Self = Self(1);

    /// Wraps raw coefficient bits as a polynomial.
    pub const fn new(coefficients: u32) -> Self {
        Self(coefficients)
    }

    /// Returns the raw coefficient bits.
    pub const fn coefficients(self) -> u32 {
        self.0
    }

    /// True for the zero polynomial.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Index of the highest set coefficient bit; zero for the zero polynomial.
    pub const fn degree(self) -> u32 {
        match self.0 {
            0 => 0,
            value => 31 - value.leading_zeros(),
        }
    }

    /// Folds the value back into field range when it crosses the 8-bit border.
    fn reduced(self) -> Self {
        if self.0 > FIELD_BORDER {
            Self(raw_div_rem(self.0, MODULUS.0).1)
        } else {
            self
        }
    }

    /// Iterative extended Euclidean algorithm. Returns the GCD together with
    /// the Bézout coefficients for `lhs` and `rhs` respectively, each reduced
    /// into field range.
    pub fn extended_gcd(mut lhs: Self, mut rhs: Self) -> (Self, Self, Self) {
        let swapped = lhs > rhs;
        if swapped {
            core::mem::swap(&mut lhs, &mut rhs);
        }
        let (mut up_l, mut up_r) = (Self::ZERO, Self::ONE);
        let (mut down_l, mut down_r) = (Self::ONE, Self::ZERO);
        while !lhs.is_zero() {
            let quotient = rhs / lhs;
            let remainder = rhs % lhs;
            let next_l = (up_l + down_l * quotient).reduced();
            let next_r = (up_r + down_r * quotient).reduced();
            rhs = lhs;
            lhs = remainder;
            up_l = down_l;
            up_r = down_r;
            down_l = next_l;
            down_r = next_r;
        }
        let gcd = rhs.reduced();
        if swapped {
            (gcd, up_r.reduced(), up_l.reduced())
        } else {
            (gcd, up_l.reduced(), up_r.reduced())
        }
    }

    /// Multiplicative inverse modulo m(x).
    ///
    /// Returns the zero polynomial when the GCD with the modulus is not one,
    /// which cannot happen for a nonzero field element and the fixed
    /// irreducible modulus but is tolerated rather than asserted.
    pub fn multiplicative_inverse(self) -> Self {
        let (gcd, coefficient, _) = Self::extended_gcd(self, MODULUS);
        if gcd != Self::ONE {
            return Self::ZERO;
        }
        coefficient.reduced()
    }
}

impl From<u8> for Gf256Poly {
    fn from(value: u8) -> Self {
        Self(u32::from(value))
    }
}

/// Long division of raw coefficient bits; `divisor` must be nonzero.
fn raw_div_rem(mut number: u32, divisor: u32) -> (u32, u32) {
    let mut quotient = 0u32;
    let divisor_degree = Gf256Poly(divisor).degree();
    while number != 0 && Gf256Poly(number).degree() >= divisor_degree {
        let shift = Gf256Poly(number).degree() - divisor_degree;
        number ^= divisor << shift;
        quotient |= 1 << shift;
    }
    (quotient, number)
}

/// Folds a double-width raw product into field range.
fn reduce_wide(mut value: u64) -> u32 {
    let modulus = u64::from(MODULUS.0);
    while value > u64::from(FIELD_BORDER) {
        let degree = 63 - value.leading_zeros();
        value ^= modulus << (degree - 8);
    }
    value as u32
}

impl Add for Gf256Poly {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for Gf256Poly {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut product = 0u64;
        let mut lhs = u64::from(self.0);
        let mut rhs = rhs.0;
        while rhs != 0 {
            if rhs & 1 != 0 {
                product ^= lhs;
            }
            lhs <<= 1;
            rhs >>= 1;
        }
        Self(reduce_wide(product))
    }
}

impl Div for Gf256Poly {
    type Output = Self;

    /// Polynomial quotient, reduced into field range when it exceeds the
    /// 8-bit border.
    ///
    /// # Panics
    ///
    /// Panics when `rhs` is the zero polynomial.
    fn div(self, rhs: Self) -> Self {
        assert!(!rhs.is_zero(), "division by the zero polynomial");
        Self(raw_div_rem(self.0, rhs.0).0).reduced()
    }
}

impl Rem for Gf256Poly {
    type Output = Self;

    /// Polynomial remainder, reduced into field range when it exceeds the
    /// 8-bit border.
    ///
    /// # Panics
    ///
    /// Panics when `rhs` is the zero polynomial.
    fn rem(self, rhs: Self) -> Self {
        assert!(!rhs.is_zero(), "remainder by the zero polynomial");
        Self(raw_div_rem(self.0, rhs.0).1).reduced()
    }
}

impl Shl<u32> for Gf256Poly {
    type Output = Self;

    fn shl(self, shift: u32) -> Self {
        Self(self.0.wrapping_shl(shift))
    }
}

impl Shr<u32> for Gf256Poly {
    type Output = Self;

    fn shr(self, shift: u32) -> Self {
        Self(self.0.wrapping_shr(shift))
    }
}

impl fmt::Display for Gf256Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut first = true;
        for index in (0..32).rev() {
            if self.0 & (1 << index) != 0 {
                if !first {
                    f.write_str(" + ")?;
                }
                write!(f, "x^{index}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Multiplies two field elements, reducing modulo m(x).
#[inline]
pub fn gf_mul(lhs: u8, rhs: u8) -> u8 {
    (Gf256Poly::from(lhs) * Gf256Poly::from(rhs)).coefficients() as u8
}
