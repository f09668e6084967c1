//! Backend implementations for integers

use crate::traits::{BitTest, ExactRoots, ModInt};
use num_modular::ModularCoreOps;

#[cfg(feature = "num-bigint")]
use num_bigint::{BigInt, BigUint};
#[cfg(feature = "num-bigint")]
use num_traits::{One, Signed, ToPrimitive, Zero};

macro_rules! impl_bittest_prim {
    ($($T:ty)*) => {$(
        impl BitTest for $T {
            #[inline]
            fn bits(&self) -> usize {
                (<$T>::BITS - self.leading_zeros()) as usize
            }
            #[inline]
            fn bit(&self, position: usize) -> bool {
                self & (1 << position) > 0
            }
            #[inline]
            fn trailing_zeros(&self) -> usize {
                <$T>::trailing_zeros(*self) as usize
            }
        }
    )*}
}
impl_bittest_prim!(u8 u16 u32 u64 u128 usize);

#[cfg(feature = "num-bigint")]
impl BitTest for BigUint {
    fn bit(&self, position: usize) -> bool {
        self.bit(position as u64)
    }
    fn bits(&self) -> usize {
        BigUint::bits(self) as usize
    }
    #[inline]
    fn trailing_zeros(&self) -> usize {
        match BigUint::trailing_zeros(self) {
            Some(a) => a as usize,
            None => 0,
        }
    }
}

// QUAD_RESIDUAL[N] has a bit i set iff i is a quadratic residue mod N.
const QUAD_RESIDUAL64: u64 = 0x0202021202030213;
const QUAD_RESIDUAL63: u64 = 0x0402483012450293;
const QUAD_RESIDUAL65: u64 = 0x218a019866014613;
const QUAD_RESIDUAL11: u64 = 0x23b;

/// Eliminate most non-squares by checking legendre symbols.
/// See H. Cohen's "Course in Computational Algebraic Number Theory",
/// algorithm 1.7.3, page 40.
#[inline]
fn maybe_square(r64: u8, r63: u8, r65: u8, r11: u8) -> bool {
    (QUAD_RESIDUAL64 >> r64) & 1 == 1
        && (QUAD_RESIDUAL63 >> r63) & 1 == 1
        // Both 0 and 64 are squares mod 65
        && (QUAD_RESIDUAL65 >> (r65 & 63)) & 1 == 1
        && (QUAD_RESIDUAL11 >> r11) & 1 == 1
}

macro_rules! impl_exactroot_uprim {
    ($($T:ty)*) => {$(
        impl ExactRoots for $T {
            fn sqrt_exact(&self) -> Option<Self> {
                let v = *self;
                if !maybe_square((v % 64) as u8, (v % 63) as u8, (v % 65) as u8, (v % 11) as u8) {
                    return None;
                }
                self.nth_root_exact(2)
            }
        }
    )*};
}
impl_exactroot_uprim!(u8 u16 u32 u64 u128 usize);

macro_rules! impl_exactroot_iprim {
    ($($T:ty)*) => {$(
        impl ExactRoots for $T {
            fn sqrt_exact(&self) -> Option<Self> {
                let v = *self;
                if v < 0 {
                    return None;
                }
                if !maybe_square((v % 64) as u8, (v % 63) as u8, (v % 65) as u8, (v % 11) as u8) {
                    return None;
                }
                self.nth_root_exact(2)
            }
        }
    )*};
}
impl_exactroot_iprim!(i8 i16 i32 i64 i128 isize);

#[cfg(feature = "num-bigint")]
impl ExactRoots for BigUint {
    fn sqrt_exact(&self) -> Option<Self> {
        let residue = |m: u8| (self % m).to_u8().unwrap_or(0);
        if !maybe_square(residue(64), residue(63), residue(65), residue(11)) {
            return None;
        }
        self.nth_root_exact(2)
    }
}

#[cfg(feature = "num-bigint")]
impl ExactRoots for BigInt {
    fn sqrt_exact(&self) -> Option<Self> {
        if self.is_negative() {
            return None;
        }
        self.magnitude().sqrt_exact().map(BigInt::from)
    }
}

/// Left-to-right binary exponentiation on top of a modular multiplication
#[inline]
fn powm_by_bits<T: ModInt + BitTest + Clone>(base: &T, exp: &T, m: &T, one: T) -> T {
    let mut result = one;
    for i in (0..exp.bits()).rev() {
        result = result.mulm(&result, m);
        if exp.bit(i) {
            result = result.mulm(base, m);
        }
    }
    result
}

macro_rules! impl_modint_uprim {
    ($($T:ty)*) => {$(
        impl ModInt for $T {
            #[inline]
            fn mulm(&self, rhs: &Self, m: &Self) -> Self {
                <$T as ModularCoreOps<&$T, &$T>>::mulm(*self, rhs, m)
            }
            #[inline]
            fn powm(&self, exp: &Self, m: &Self) -> Self {
                powm_by_bits(&(self % m), exp, m, 1 % *m)
            }
        }
    )*}
}
impl_modint_uprim!(u8 u16 u32 u64 u128);

impl ModInt for usize {
    #[inline]
    fn mulm(&self, rhs: &Self, m: &Self) -> Self {
        ModInt::mulm(&(*self as u64), &(*rhs as u64), &(*m as u64)) as usize
    }
    #[inline]
    fn powm(&self, exp: &Self, m: &Self) -> Self {
        ModInt::powm(&(*self as u64), &(*exp as u64), &(*m as u64)) as usize
    }
}

#[cfg(feature = "num-bigint")]
impl ModInt for BigUint {
    #[inline]
    fn mulm(&self, rhs: &Self, m: &Self) -> Self {
        (self * rhs) % m
    }
    #[inline]
    fn powm(&self, exp: &Self, m: &Self) -> Self {
        if m.is_one() {
            return BigUint::zero();
        }
        self.modpow(exp, m)
    }
}
