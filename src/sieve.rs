//! Incremental sieve of Eratosthenes with a 2·3·5·7·11 wheel

use crate::tables::{WHEEL_PRIMES, WHEEL_SIZE};
use bitvec::bitvec;
use bitvec::vec::BitVec;
use num_integer::Integer;
use std::collections::HashMap;

/// First candidate after the wheel primes
const FIRST_CANDIDATE: u64 = 13;

/// An unbounded stream of the primes below 2^64, produced by an incremental sieve.
///
/// Candidates are the odd integers coprime to the wheel size. Every prime found so far
/// (up to the square root of the current candidate) has an entry in a map from its
/// next odd multiple on the wheel to the prime itself, so a candidate is composite
/// exactly when it's a key of the map.
#[derive(Debug, Clone)]
pub struct PrimeSieve {
    /// bit i is set iff gcd(i, WHEEL_SIZE) = 1
    wheel: BitVec,
    pending: HashMap<u64, u64>,
    /// number of wheel primes yielded so far
    yielded: usize,
    candidate: Option<u64>,
}

impl PrimeSieve {
    pub fn new() -> Self {
        let mut wheel = bitvec![0; WHEEL_SIZE as usize];
        for i in 0..WHEEL_SIZE {
            if i.gcd(&WHEEL_SIZE) == 1 {
                wheel.set(i as usize, true);
            }
        }

        PrimeSieve {
            wheel,
            pending: HashMap::new(),
            yielded: 0,
            candidate: Some(FIRST_CANDIDATE),
        }
    }

    /// Rewind the stream to 2
    pub fn restart(&mut self) {
        self.pending.clear();
        self.yielded = 0;
        self.candidate = Some(FIRST_CANDIDATE);
    }

    #[inline]
    fn on_wheel(&self, n: u64) -> bool {
        self.wheel[(n % WHEEL_SIZE) as usize]
    }

    /// Move the prime p from the composite n to its next multiple on the wheel that is
    /// not claimed by another prime. Multiples beyond u64 are never reached and dropped.
    fn advance(&mut self, n: u64, p: u64) {
        let step = 2 * p;
        let mut m = n;
        loop {
            m = match m.checked_add(step) {
                Some(m) => m,
                None => return,
            };
            if self.on_wheel(m) && !self.pending.contains_key(&m) {
                break;
            }
        }
        self.pending.insert(m, p);
    }
}

impl Default for PrimeSieve {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for PrimeSieve {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.yielded < WHEEL_PRIMES.len() {
            self.yielded += 1;
            return Some(WHEEL_PRIMES[self.yielded - 1]);
        }

        loop {
            let n = self.candidate?;
            self.candidate = n.checked_add(2);
            if !self.on_wheel(n) {
                continue;
            }

            match self.pending.remove(&n) {
                Some(p) => self.advance(n, p),
                None => {
                    if let Some(square) = n.checked_mul(n) {
                        self.pending.insert(square, n);
                        if self.pending.len().is_power_of_two() {
                            log::debug!(
                                "prime sieve tracks {} primes, reached {}",
                                self.pending.len(),
                                n
                            );
                        }
                    }
                    return Some(n);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primality::PrimeStream;

    #[test]
    fn sieve_test() {
        let first: Vec<u64> = PrimeSieve::new().take(10).collect();
        assert_eq!(first, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);

        let sieved: Vec<u64> = PrimeSieve::new().take(1000).collect();
        let tested: Vec<u64> = PrimeStream::<u64>::new().take(1000).collect();
        assert_eq!(sieved, tested);

        // 10000th prime
        assert_eq!(PrimeSieve::new().nth(9999), Some(104729));
    }

    #[test]
    fn wheel_test() {
        let sieve = PrimeSieve::new();
        // φ(2310) = 1 * 2 * 4 * 6 * 10
        assert_eq!(sieve.wheel.count_ones(), 480);
        assert!(sieve.on_wheel(13));
        assert!(sieve.on_wheel(2311));
        assert!(!sieve.on_wheel(2315));
        assert!(!sieve.on_wheel(121));
    }

    #[test]
    fn restart_test() {
        let mut s1 = PrimeSieve::new();
        let a: Vec<u64> = s1.by_ref().take(200).collect();
        let mut s2 = s1.clone();
        assert_eq!(s1.next(), s2.next());

        s1.restart();
        assert_eq!(s1.take(200).collect::<Vec<_>>(), a);
        assert_eq!(s2.next(), Some(1231));
    }
}
