//! Generic integer sequences based on `num`: generalized Fibonacci and Lucas (P, Q)
//! recurrences, primes, composites and polygonal numbers.
//!
//! Every sequence is available as a lazy, restartable stream and comes with a
//! membership test. Generalized Fibonacci terms can also be evaluated directly at any
//! (possibly negative) index. The free functions in [seq_funcs] are the simplest entry
//! points, the structs they return can be configured further.
//!
//! ```
//! use num_seq::seq_funcs::{is_fibonacci, nth_fibonacci, prime_sieve};
//!
//! assert_eq!(nth_fibonacci(90, &[0i128, 1])?, 2880067194370816120);
//! assert!(is_fibonacci(&2880067194370816120i128, &[0, 1])?);
//! assert_eq!(prime_sieve().take(5).collect::<Vec<_>>(), [2, 3, 5, 7, 11]);
//! # Ok::<(), num_seq::SeqError>(())
//! ```

mod error;
mod fastnth;
mod integer;
mod membership;
mod polygonal;
mod primality;
mod rand;
mod recurrence;
mod sieve;
mod tables;
mod traits;

pub mod seq_funcs;

pub use error::SeqError;
pub use fastnth::nth_term;
pub use membership::{is_canonical_fibonacci, is_fibonacci_member, is_lucas_member, scan};
pub use polygonal::PolygonalStream;
pub use primality::{trial_division, CompositeStream, MillerRabin, PrimeStream};
pub use recurrence::{
    FibonacciStream, LucasParams, LucasRule, LucasStream, NegaFibonacciStream, RecurrenceState,
    RecurrenceStream, SumRule,
};
pub use sieve::PrimeSieve;
pub use traits::{
    BitTest, ExactRoots, MembershipConfig, MillerRabinConfig, ModInt, PrimalityUtils,
    RandWitness, RecurrenceBase, RecurrenceRule, Trend,
};

pub mod detail {
    pub use super::primality::{PrimalityBase, PrimalityRefBase};
    pub use super::tables::{SMALL_PRIMES, WHEEL_PRIMES, WHEEL_SIZE};
}
