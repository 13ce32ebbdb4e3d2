//! Arithmetic in GF(2^128) as used by GCM.
//!
//! Elements are stored in the bit order of the GCM specification: the big-endian
//! interpretation of a 16-byte block, where the most significant bit of the `u128` is the
//! coefficient of `x^0`. Blocks therefore convert with [`Gf2_128::from_be_bytes`] and
//! [`Gf2_128::to_be_bytes`] without any reflection, and the multiplicative identity is
//! `1 << 127`.
//!
//! The field is defined by the reduction polynomial `x^128 + x^7 + x^2 + x + 1`.
//! Multiplication is a branch-free shift-and-reduce, so the running time does not depend on
//! the operands. This matters because operands are usually shares of a secret hash subkey.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::ops::{Add, AddAssign, Mul, MulAssign};

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// R is GCM polynomial in little-endian. In hex: "E1000000000000000000000000000000"
const R: u128 = 0xE1 << 120;

/// An element of GF(2^128) in GCM bit order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gf2_128(u128);

impl Gf2_128 {
    /// Creates a new field element from its integer representation.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the additive identity.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the multiplicative identity.
    pub const fn one() -> Self {
        Self(1 << 127)
    }

    /// Returns the integer representation.
    pub const fn inner(&self) -> u128 {
        self.0
    }

    /// Interprets a 16-byte block as a field element.
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// Returns the 16-byte block encoding of this element.
    pub const fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Returns `true` if this is the additive identity.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the multiplicative inverse.
    ///
    /// Computed as `self^(2^128 - 2)`, so the inverse of zero is zero.
    pub fn inverse(&self) -> Self {
        let mut x = *self;
        let mut out = Self::one();

        for _ in 0..127 {
            x = x * x;
            out = out * x;
        }
        out
    }
}

impl From<u128> for Gf2_128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Gf2_128> for u128 {
    fn from(value: Gf2_128) -> Self {
        value.0
    }
}

impl From<[u8; 16]> for Gf2_128 {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_be_bytes(bytes)
    }
}

impl From<Gf2_128> for [u8; 16] {
    fn from(value: Gf2_128) -> Self {
        value.to_be_bytes()
    }
}

impl Add for Gf2_128 {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf2_128 {
    #[allow(clippy::suspicious_op_assign_impl)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for Gf2_128 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(mul(self.0, rhs.0))
    }
}

impl MulAssign for Gf2_128 {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 = mul(self.0, rhs.0);
    }
}

impl ConstantTimeEq for Gf2_128 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for Gf2_128 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Galois field multiplication of two 128-bit blocks reduced by the GCM polynomial.
///
/// Bits of `y` are consumed from the most significant end. Both the conditional add and the
/// conditional reduction are applied through all-ones/all-zeros masks.
fn mul(mut x: u128, y: u128) -> u128 {
    let mut result: u128 = 0;
    for i in (0..128).rev() {
        result ^= x & ((y >> i) & 1).wrapping_neg();
        x = (x >> 1) ^ (R & (x & 1).wrapping_neg());
    }
    result
}

/// Computes `[h, h^2, ..., h^n]`.
///
/// Entry `i` of the returned vector holds `h^(i + 1)`.
pub fn powers(h: Gf2_128, n: usize) -> Vec<Gf2_128> {
    (0..n)
        .scan(h, |acc, _| {
            let power = *acc;
            *acc = power * h;
            Some(power)
        })
        .collect()
}
