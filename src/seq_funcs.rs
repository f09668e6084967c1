//! Standalone sequence functions, each call builds its own streams and testers

use crate::error::SeqError;
use crate::fastnth::nth_term;
use crate::membership::{is_fibonacci_member, is_lucas_member};
use crate::polygonal::PolygonalStream;
use crate::primality::{CompositeStream, PrimalityBase, PrimalityRefBase, PrimeStream};
use crate::recurrence::{
    FibonacciStream, LucasParams, LucasRule, LucasStream, NegaFibonacciStream, RecurrenceState,
    RecurrenceStream, SumRule,
};
use crate::sieve::PrimeSieve;
use crate::traits::{MembershipConfig, RecurrenceBase};
use num_integer::Integer;
use num_traits::{FromPrimitive, NumRef, RefNum, ToPrimitive};

pub use crate::polygonal::is_polygonal;
pub use crate::primality::{is_composite, is_prime, miller_rabin};

/// Stream the generalized Fibonacci sequence F(0), F(1), ... where every term past the
/// seed is the sum of the previous `start.len()` terms. `&[0, 1]` gives the Fibonacci
/// numbers, `&[0, 0, 1]` the Tribonacci numbers.
///
/// ```
/// # use num_seq::seq_funcs::fibonacci_stream;
/// let fib: Vec<i64> = fibonacci_stream(&[0, 1])?.take(8).collect();
/// assert_eq!(fib, [0, 1, 1, 2, 3, 5, 8, 13]);
/// # Ok::<(), num_seq::SeqError>(())
/// ```
pub fn fibonacci_stream<T: RecurrenceBase>(start: &[T]) -> Result<FibonacciStream<T>, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    RecurrenceStream::new(RecurrenceState::from_slice(start)?, SumRule)
}

/// Stream the generalized Fibonacci sequence backwards: F(0), F(-1), F(-2), ...
///
/// ```
/// # use num_seq::seq_funcs::negafibonacci_stream;
/// let nega: Vec<i64> = negafibonacci_stream(&[0, 1])?.take(6).collect();
/// assert_eq!(nega, [0, 1, -1, 2, -3, 5]);
/// # Ok::<(), num_seq::SeqError>(())
/// ```
pub fn negafibonacci_stream<T: RecurrenceBase>(
    start: &[T],
) -> Result<NegaFibonacciStream<T>, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    Ok(NegaFibonacciStream::new(RecurrenceState::from_slice(start)?))
}

/// Compute F(n) of the generalized Fibonacci sequence for any integer index, negative
/// indices included, in O(k³ log |n|) arithmetic operations.
///
/// ```
/// # use num_seq::seq_funcs::nth_fibonacci;
/// assert_eq!(nth_fibonacci(10, &[0i64, 1])?, 55);
/// assert_eq!(nth_fibonacci(-10, &[0i64, 1])?, -55);
/// assert_eq!(nth_fibonacci(37u8, &[0i64, 0, 1])?, 1132436852);
/// # Ok::<(), num_seq::SeqError>(())
/// ```
pub fn nth_fibonacci<T: RecurrenceBase, I: Integer + ToPrimitive>(
    n: I,
    start: &[T],
) -> Result<T, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let seed = RecurrenceState::from_slice(start)?;
    let n = n
        .to_i64()
        .ok_or_else(|| SeqError::index("the index doesn't fit in a 64-bit integer"))?;
    Ok(nth_term(&seed, n))
}

/// Stream the Lucas sequence `U(n) = P * U(n-1) - Q * U(n-2)` started by a seed
/// of exactly two terms.
///
/// ```
/// # use num_seq::seq_funcs::lucas_stream;
/// let mersenne: Vec<i64> = lucas_stream(3, 2, &[0, 1])?.take(6).collect();
/// assert_eq!(mersenne, [0, 1, 3, 7, 15, 31]);
/// # Ok::<(), num_seq::SeqError>(())
/// ```
pub fn lucas_stream<T: RecurrenceBase>(p: T, q: T, start: &[T]) -> Result<LucasStream<T>, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let rule = LucasRule::new(LucasParams::new(p, q));
    RecurrenceStream::new(RecurrenceState::from_slice(start)?, rule)
}

/// Stream the Lucas sequence with (P, Q) = (2, -1), which gives the Pell numbers from `&[0, 1]`
/// and the Pell-Lucas numbers from `&[2, 2]`.
pub fn pell_stream<T: RecurrenceBase>(start: &[T]) -> Result<LucasStream<T>, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let rule = LucasRule::new(LucasParams::pell());
    RecurrenceStream::new(RecurrenceState::from_slice(start)?, rule)
}

/// Test whether n is a term F(m), m >= 0, of the generalized Fibonacci sequence.
///
/// ```
/// # use num_seq::seq_funcs::is_fibonacci;
/// assert!(is_fibonacci(&21i64, &[0, 1])?);
/// assert!(!is_fibonacci(&22i64, &[0, 1])?);
/// assert!(is_fibonacci(&149i64, &[0, 0, 1])?);
/// # Ok::<(), num_seq::SeqError>(())
/// ```
pub fn is_fibonacci<T: RecurrenceBase>(n: &T, start: &[T]) -> Result<bool, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let seed = RecurrenceState::from_slice(start)?;
    is_fibonacci_member(n, &seed, MembershipConfig::default())
}

/// Test whether n is a term U(m), m >= 0, of the Lucas sequence with parameters (P, Q).
///
/// Parameters with complex characteristic roots may never let the scan reach a verdict,
/// in which case [SeqError::ScanLimit] is returned, or [SeqError::Overflow] if the terms
/// outgrow `T` first.
///
/// ```
/// # use num_seq::seq_funcs::is_lucas;
/// assert!(is_lucas(&70i64, 2, -1, &[0, 1])?);
/// assert!(!is_lucas(&71i64, 2, -1, &[0, 1])?);
/// # Ok::<(), num_seq::SeqError>(())
/// ```
pub fn is_lucas<T: RecurrenceBase>(n: &T, p: T, q: T, start: &[T]) -> Result<bool, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let seed = RecurrenceState::from_slice(start)?;
    is_lucas_member(n, &LucasParams::new(p, q), &seed, MembershipConfig::default())
}

/// Test whether n is a term of the Lucas sequence with (P, Q) = (2, -1)
pub fn is_pell<T: RecurrenceBase>(n: &T, start: &[T]) -> Result<bool, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let seed = RecurrenceState::from_slice(start)?;
    is_lucas_member(n, &LucasParams::pell(), &seed, MembershipConfig::default())
}

/// Stream the primes 2, 3, 5, ... of any integer type, tested one by one with trial division.
/// For `u64` primes [prime_sieve] is much faster.
pub fn prime_stream<T: PrimalityBase>() -> PrimeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    PrimeStream::new()
}

/// Stream 1 and then the composites 4, 6, 8, 9, ...
///
/// ```
/// # use num_seq::seq_funcs::composite_stream;
/// let c: Vec<u32> = composite_stream().take(6).collect();
/// assert_eq!(c, [1, 4, 6, 8, 9, 10]);
/// ```
pub fn composite_stream<T: PrimalityBase>() -> CompositeStream<T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    CompositeStream::new()
}

/// Stream the primes below 2^64 with an incremental wheel sieve
///
/// ```
/// # use num_seq::seq_funcs::prime_sieve;
/// assert_eq!(prime_sieve().nth(99), Some(541));
/// ```
pub fn prime_sieve() -> PrimeSieve {
    PrimeSieve::new()
}

/// Stream the s-gonal numbers P(s, 1), P(s, 2), ...
///
/// ```
/// # use num_seq::seq_funcs::polygonal_stream;
/// let hexagonal: Vec<u64> = polygonal_stream(6)?.take(5).collect();
/// assert_eq!(hexagonal, [1, 6, 15, 28, 45]);
/// # Ok::<(), num_seq::SeqError>(())
/// ```
pub fn polygonal_stream<T: Integer + Clone + FromPrimitive + NumRef>(
    sides: usize,
) -> Result<PolygonalStream<T>, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    PolygonalStream::new(sides)
}
