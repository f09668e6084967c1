use crate::error::SeqError;
use crate::tables::SMALL_PRIMES;
use crate::traits::{BitTest, MillerRabinConfig, ModInt, PrimalityUtils, RandWitness};
use num_integer::{Integer, Roots};
use num_traits::{FromPrimitive, NumRef, RefNum, ToPrimitive};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Display;

pub trait PrimalityBase:
    Integer + Roots + NumRef + Clone + FromPrimitive + ToPrimitive + BitTest + ModInt + Display
{
}
impl<T: Integer + Roots + NumRef + Clone + FromPrimitive + ToPrimitive + BitTest + ModInt + Display>
    PrimalityBase for T
{
}
pub trait PrimalityRefBase<Base>: RefNum<Base> + std::ops::Shr<usize, Output = Base> {}
impl<T, Base> PrimalityRefBase<Base> for T where
    T: RefNum<Base> + std::ops::Shr<usize, Output = Base>
{
}

impl<T: PrimalityBase> PrimalityUtils for T
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    fn is_sprp(&self, base: T) -> bool {
        if self <= &Self::one() {
            return false;
        }

        // find 2^shift*u + 1 = n
        let tm1 = self - T::one();
        let shift = tm1.trailing_zeros();
        let u = &tm1 >> shift;

        let mut x = base.powm(&u, self);
        if x.is_one() || x == tm1 {
            return true;
        }

        for _ in 1..shift {
            x = x.mulm(&x, self);
            if x == tm1 {
                return true;
            }
            if x.is_one() {
                return false; // nontrivial square root of 1
            }
        }
        false
    }
}

/// Find the smallest divisor of the target between 2 and sqrt(target) by trial division,
/// returns None if there is no such divisor.
pub fn trial_division<T: PrimalityBase>(target: &T) -> Option<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    let two = T::one() + T::one();
    if target < &(&two + &two) {
        return None;
    }
    if target.is_even() {
        return Some(two);
    }

    let bound = Roots::sqrt(target);
    let mut d = &two + T::one();
    while d <= bound {
        if target.is_multiple_of(&d) {
            return Some(d);
        }
        d = d + &two;
    }
    None
}

/// Deterministic primality test by trial division. Integers below 2 are not prime.
pub fn is_prime<T: PrimalityBase>(target: &T) -> bool
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    if target < &(T::one() + T::one()) {
        return false;
    }
    trial_division(target).is_none()
}

/// Deterministic compositeness test by trial division. 0, 1, 2 and 3 are not composite.
pub fn is_composite<T: PrimalityBase>(target: &T) -> bool
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    trial_division(target).is_some()
}

/// Probabilistic primality test with random witnesses.
///
/// Each tester owns its random generator, so separate testers never share random state.
pub struct MillerRabin<R = StdRng> {
    config: MillerRabinConfig,
    rng: R,
}

impl MillerRabin<StdRng> {
    /// Create a tester with a generator seeded from the system entropy
    pub fn new(config: MillerRabinConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R> MillerRabin<R> {
    pub fn with_rng(config: MillerRabinConfig, rng: R) -> Self {
        Self { config, rng }
    }

    #[inline]
    pub fn config(&self) -> &MillerRabinConfig {
        &self.config
    }

    /// Return false if the target is proven composite, otherwise it's a probable prime.
    /// A composite passes with probability at most `config.error_bound()`.
    pub fn test<T: PrimalityBase>(&mut self, target: &T) -> bool
    where
        for<'r> &'r T: PrimalityRefBase<T>,
        R: RandWitness<T>,
    {
        // shortcuts
        if let Some(small) = target.to_u8() {
            return SMALL_PRIMES.binary_search(&small).is_ok();
        }
        if target.is_even() {
            return false;
        }

        for round in 0..self.config.rounds {
            let base = self.rng.gen_witness(target);
            if !target.is_sprp(base.clone()) {
                log::trace!(
                    "{} is a witness for the compositeness of {} (round {})",
                    base,
                    target,
                    round
                );
                return false;
            }
        }
        true
    }
}

/// Run the Miller-Rabin test with a fresh tester
pub fn miller_rabin<T: PrimalityBase>(target: &T, rounds: usize) -> Result<bool, SeqError>
where
    for<'r> &'r T: PrimalityRefBase<T>,
    StdRng: RandWitness<T>,
{
    let config = MillerRabinConfig::new(rounds)?;
    Ok(MillerRabin::new(config).test(target))
}

/// A lazy stream of the primes 2, 3, 5, 7, ..., found by testing every integer with trial division
#[derive(Debug, Clone)]
pub struct PrimeStream<T> {
    candidate: T,
}

impl<T: PrimalityBase> PrimeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    pub fn new() -> Self {
        Self {
            candidate: T::one() + T::one(),
        }
    }

    pub fn restart(&mut self) {
        self.candidate = T::one() + T::one();
    }
}

impl<T: PrimalityBase> Default for PrimeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PrimalityBase> Iterator for PrimeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let n = std::mem::replace(&mut self.candidate, T::zero());
            self.candidate = &n + T::one();
            if is_prime(&n) {
                return Some(n);
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// A lazy stream of 1 followed by the composites 4, 6, 8, 9, ...
///
/// 1 is not composite, but by convention the stream yields every positive integer that is not prime.
#[derive(Debug, Clone)]
pub struct CompositeStream<T> {
    candidate: T,
}

impl<T: PrimalityBase> CompositeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    pub fn new() -> Self {
        Self {
            candidate: T::one(),
        }
    }

    pub fn restart(&mut self) {
        self.candidate = T::one();
    }
}

impl<T: PrimalityBase> Default for CompositeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PrimalityBase> Iterator for CompositeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let n = std::mem::replace(&mut self.candidate, T::zero());
            self.candidate = &n + T::one();
            if !is_prime(&n) {
                return Some(n);
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::CARMICHAEL;
    #[cfg(feature = "num-bigint")]
    use num_bigint::BigUint;
    use rand::random;

    const PRIME100: [u64; 25] = [
        2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
        89, 97,
    ];

    #[test]
    fn trial_division_test() {
        for x in 0..100u64 {
            assert_eq!(PRIME100.contains(&x), is_prime(&x), "is_prime({})", x);
            assert_eq!(x >= 4 && !PRIME100.contains(&x), is_composite(&x), "is_composite({})", x);
        }
        assert!(!is_prime(&0u8) && !is_prime(&1u8));
        assert!(!is_composite(&0u8) && !is_composite(&1u8));
        assert!(is_prime(&251u8));
        assert!(is_prime(&65521u16));
        assert!(is_prime(&4294967291u32));
        assert!(is_composite(&4294967297u64)); // F5 = 641 * 6700417

        assert_eq!(trial_division(&91u32), Some(7));
        assert_eq!(trial_division(&(65521u64 * 65537)), Some(65521));
        assert_eq!(trial_division(&97u32), None);

        // ensure no small factor for random primes
        for _ in 0..100 {
            let x = random::<u32>() as u64;
            if !is_prime(&x) {
                assert!(x < 2 || trial_division(&x).map_or(false, |d| x % d == 0));
                continue;
            }
            for p in PRIME100.iter() {
                assert!(x == *p || x % p != 0);
            }
        }
    }

    #[test]
    fn sprp_test() {
        // strong pseudoprimes of base 2 (OEIS A001262) under 10000
        let spsp: [u16; 5] = [2047, 3277, 4033, 4681, 8321];
        for psp in spsp {
            assert!(psp.is_sprp(2));
            assert!(is_composite(&psp));
        }

        // 561 is a Fermat pseudoprime to base 2, but 2 exposes a nontrivial square root of 1
        assert!(!561u16.is_sprp(2));
        for p in PRIME100.iter().skip(1) {
            assert!(p.is_sprp(2));
        }
    }

    #[test]
    fn miller_rabin_agrees_with_trial_division() {
        let mut mr = MillerRabin::with_rng(MillerRabinConfig::default(), StdRng::seed_from_u64(2024));
        for n in 0..10000u32 {
            assert_eq!(mr.test(&n), is_prime(&n), "n = {}", n);
        }

        assert_eq!(miller_rabin(&7919u64, 8), Ok(true));
        assert_eq!(miller_rabin(&(7919u64 * 7927), 8), Ok(false));
        assert_eq!(miller_rabin(&1u64, 8), Ok(false));
        assert_eq!(miller_rabin(&0u64, 8), Ok(false));
        assert_eq!(miller_rabin(&97u64, 0), Err(SeqError::InvalidRounds));
    }

    #[test]
    fn miller_rabin_large_test() {
        let mut mr = MillerRabin::new(MillerRabinConfig::default());
        assert!(mr.test(&18446744073709551557u64)); // largest 64-bit prime
        assert!(!mr.test(&18446744073709551559u64));
        assert!(mr.test(&(u128::MAX - 158))); // largest 128-bit prime
        assert!(!mr.test(&(u128::MAX - 160)));

        #[cfg(feature = "num-bigint")]
        {
            let m127 = BigUint::from(2u8).pow(127) - 1u8;
            assert!(mr.test(&m127));
            let f7 = BigUint::from(2u8).pow(128) + 1u8;
            assert!(!mr.test(&f7));
            assert!(mr.test(&BigUint::from(251u8)));
        }
    }

    #[test]
    fn miller_rabin_error_bound() {
        let mut rng = StdRng::seed_from_u64(561);
        for rounds in 1..=3 {
            let config = MillerRabinConfig::new(rounds).unwrap();
            let mut mr = MillerRabin::with_rng(config, &mut rng);
            let trials = 500;
            let mut passed = 0;
            for c in CARMICHAEL.iter() {
                passed += (0..trials).filter(|_| mr.test(c)).count();
            }
            let rate = passed as f64 / (trials * CARMICHAEL.len()) as f64;
            assert!(rate <= config.error_bound(), "rounds = {}, rate = {}", rounds, rate);
        }
    }

    #[test]
    fn prime_stream_test() {
        let first: Vec<u64> = PrimeStream::new().take(5).collect();
        assert_eq!(first, [2, 3, 5, 7, 11]);
        let mut stream = PrimeStream::<u32>::new();
        let primes: Vec<u64> = stream.by_ref().take(25).map(u64::from).collect();
        assert_eq!(primes, PRIME100);
        stream.restart();
        assert_eq!(stream.next(), Some(2));

        // OEIS A000040, the 1000th prime is 7919
        assert_eq!(PrimeStream::<u64>::new().nth(999), Some(7919));
    }

    #[test]
    fn composite_stream_test() {
        let first: Vec<u64> = CompositeStream::new().take(5).collect();
        assert_eq!(first, [1, 4, 6, 8, 9]);

        let mut stream = CompositeStream::<u64>::new();
        for n in stream.by_ref().skip(1).take(1000) {
            assert!(is_composite(&n));
        }
        stream.restart();
        assert_eq!(stream.next(), Some(1));

        // primes and the composite stream partition the positive integers
        let mut merged: Vec<u64> = PrimeStream::new()
            .take_while(|&p| p < 500)
            .chain(CompositeStream::new().take_while(|&c| c < 500))
            .collect();
        merged.sort_unstable();
        assert_eq!(merged, (1..500).collect::<Vec<_>>());
    }
}
