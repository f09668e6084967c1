use crate::error::SeqError;
use num_integer::{Integer, Roots};
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, NumRef, Signed};
use std::collections::VecDeque;
use std::fmt::Display;

/// This trait support unified bit testing for (unsigned) integers
pub trait BitTest {
    /// Get the minimum required number of bits to represent this integer
    fn bits(&self) -> usize;

    /// Get the i-th bit of the integer, with i specified by `position`
    fn bit(&self, position: usize) -> bool;

    /// Get the number of trailing zeros in the integer
    fn trailing_zeros(&self) -> usize;
}

/// Extension on [num_integer::Roots] to support exact root extraction on integers
pub trait ExactRoots: Roots + Clone {
    /// Return the exact n-th root if the integer is a perfect n-th power
    fn nth_root_exact(&self, n: u32) -> Option<Self> {
        if n % 2 == 0 && self < &Self::zero() {
            return None;
        }
        let r = self.nth_root(n);
        if &num_traits::pow(r.clone(), n as usize) == self {
            Some(r)
        } else {
            None
        }
    }

    /// Return the exact square root if the integer is a perfect square
    fn sqrt_exact(&self) -> Option<Self> {
        self.nth_root_exact(2)
    }

    /// Test if the integer is a perfect square
    fn is_square(&self) -> bool {
        self.sqrt_exact().is_some()
    }
}

/// This trait describes modular arithmetic on a (unsigned) integer
pub trait ModInt: Sized {
    /// Return (self * rhs) % m
    fn mulm(&self, rhs: &Self, m: &Self) -> Self;

    /// Return (self ^ exp) % m
    fn powm(&self, exp: &Self, m: &Self) -> Self;
}

/// This trait implements various primality testing utilities
pub trait PrimalityUtils: Sized {
    /// Test if the integer is a strong probable prime to the given base (one round of the
    /// Miller-Rabin test). The base should be in `[2, self - 2]`.
    fn is_sprp(&self, base: Self) -> bool;
}

/// Pick random bases for the Miller-Rabin test
pub trait RandWitness<T> {
    /// Generate a uniformly random base in `[2, n - 2]`. The target `n` must be at least 5.
    fn gen_witness(&mut self, n: &T) -> T;
}

/// Long-run shape of a recurrence, as far as it can be proven from the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Every later term is no smaller than the last term of the window
    Rising,
    /// Every later term is no larger than the last term of the window
    Falling,
    /// Signs alternate and every later term is no smaller in magnitude than the last term
    Widening,
}

/// The update rule of a homogeneous linear recurrence with constant coefficients
pub trait RecurrenceRule<T> {
    /// Check that a seed with `order` terms can drive this rule
    fn check_order(&self, order: usize) -> Result<(), SeqError>;

    /// Compute the term following the window. The window holds the last
    /// `order` terms, the oldest one first.
    fn next_term(&self, window: &VecDeque<T>) -> T;

    /// Same as [RecurrenceRule::next_term], but returns None if the term doesn't fit in `T`.
    /// A rule may also give up when an intermediate product doesn't fit.
    fn checked_next_term(&self, window: &VecDeque<T>) -> Option<T>;

    /// Classify the sequence continuing from the window, None if nothing can be proven yet
    fn trend(&self, _window: &VecDeque<T>) -> Option<Trend> {
        None
    }

    /// Decide in closed form whether n is one of the terms following the window,
    /// None if the rule can't tell without generating them
    fn search(&self, _window: &VecDeque<T>, _n: &T) -> Option<bool> {
        None
    }
}

/// Configuration of the probabilistic Miller-Rabin test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MillerRabinConfig {
    /// Number of random witness rounds, a composite passes all of them with
    /// probability at most 4^(-rounds)
    pub rounds: usize,
}

impl MillerRabinConfig {
    /// Returns [SeqError::InvalidRounds] if `rounds` is zero
    pub fn new(rounds: usize) -> Result<Self, SeqError> {
        if rounds == 0 {
            return Err(SeqError::InvalidRounds);
        }
        Ok(Self { rounds })
    }

    /// Upper bound of the probability that a composite passes all rounds
    pub fn error_bound(&self) -> f64 {
        0.25_f64.powi(self.rounds.min(i32::MAX as usize) as i32)
    }
}

impl Default for MillerRabinConfig {
    fn default() -> Self {
        Self { rounds: 8 }
    }
}

/// Configuration of the forward scan used by membership tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipConfig {
    /// Maximum number of terms examined while the sequence has not settled into
    /// a monotone or widening regime. Terms generated inside a regime are not counted.
    pub scan_limit: usize,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self { scan_limit: 1 << 16 }
    }
}

/// Integer types that can carry recurrence terms
pub trait RecurrenceBase:
    Integer + Signed + NumRef + CheckedAdd + CheckedSub + CheckedMul + ExactRoots + Clone + Display
{
}
impl<T> RecurrenceBase for T where
    T: Integer + Signed + NumRef + CheckedAdd + CheckedSub + CheckedMul + ExactRoots + Clone + Display
{
}
