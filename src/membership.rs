//! Membership tests on recurrence sequences
//!
//! The canonical Fibonacci numbers are recognized in closed form. Other seeds and
//! the Lucas (P, Q) family are scanned forward until a verdict can be proven, see [scan].

use crate::error::SeqError;
use crate::recurrence::{
    exceeds, LucasParams, LucasRule, RecurrenceState, RecurrenceStream, SumRule,
};
use crate::traits::{MembershipConfig, RecurrenceBase, RecurrenceRule, Trend};
use num_traits::RefNum;

/// n is a Fibonacci number iff 5n² + 4 or 5n² - 4 is a perfect square.
///
/// When 5n² + 4 doesn't fit in `T`, the terms are walked up to n instead.
pub fn is_canonical_fibonacci<T: RecurrenceBase>(n: &T) -> bool
where
    for<'r> &'r T: RefNum<T>,
{
    if n.is_negative() {
        return false;
    }
    let two = T::one() + T::one();
    let four = &two + &two;
    let five = &four + T::one();
    let plus = n
        .checked_mul(n)
        .and_then(|sq| sq.checked_mul(&five))
        .and_then(|m| m.checked_add(&four));
    if let Some(plus) = plus {
        let minus = &plus - &four - &four;
        return plus.is_square() || minus.is_square();
    }

    // only the last few dozen terms of a fixed-width type get here
    let (mut a, mut b) = (T::zero(), T::one());
    while &b < n {
        match a.checked_add(&b) {
            Some(c) => a = std::mem::replace(&mut b, c),
            None => return false,
        }
    }
    &b == n
}

/// Test whether n occurs at a non-negative index of the generalized Fibonacci
/// sequence started by `seed`. Negative n is never a member.
pub fn is_fibonacci_member<T: RecurrenceBase>(
    n: &T,
    seed: &RecurrenceState<T>,
    config: MembershipConfig,
) -> Result<bool, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let stream = RecurrenceStream::new(seed.clone(), SumRule)?;
    if n.is_negative() {
        return Ok(false);
    }
    if seed.is_canonical_fibonacci() {
        return Ok(is_canonical_fibonacci(n));
    }
    scan(stream, n, config)
}

/// Test whether n occurs at a non-negative index of the Lucas sequence with
/// parameters (P, Q) started by `seed`. Negative n is never a member.
pub fn is_lucas_member<T: RecurrenceBase>(
    n: &T,
    params: &LucasParams<T>,
    seed: &RecurrenceState<T>,
    config: MembershipConfig,
) -> Result<bool, SeqError>
where
    for<'r> &'r T: RefNum<T>,
{
    let stream = RecurrenceStream::new(seed.clone(), LucasRule::new(params.clone()))?;
    if n.is_negative() {
        return Ok(false);
    }
    scan(stream, n, config)
}

/// Pull terms from a fresh stream until n is found or proven absent.
///
/// The scan stops without a match when the rule proves that the sequence is
/// monotone (or widening in magnitude) from the current window and the last term
/// is already past n, or when the window repeats, which makes every later term a
/// repetition. Repetitions are found with Brent's cycle detection. Terms produced
/// while no regime is proven count against `config.scan_limit`.
///
/// Rules that can decide membership in closed form (see [RecurrenceRule::search])
/// skip the scan. For fixed-width types, a term that doesn't fit in `T` ends the
/// scan with a miss inside a proven regime, and with [SeqError::Overflow] otherwise.
pub fn scan<T: RecurrenceBase, R: RecurrenceRule<T>>(
    mut stream: RecurrenceStream<T, R>,
    n: &T,
    config: MembershipConfig,
) -> Result<bool, SeqError> {
    let order = stream.seed().order();
    if stream.by_ref().take(order).any(|t| &t == n) {
        return Ok(true);
    }
    if let Some(found) = stream.rule().search(stream.window(), n) {
        log::trace!("membership of {} decided in closed form: {}", n, found);
        return Ok(found);
    }

    let mut saved = stream.window().clone();
    let (mut power, mut lam) = (1usize, 0usize);
    let mut unclassified = 0usize;
    loop {
        let trend = stream.rule().trend(stream.window());
        {
            let window = stream.window();
            let last = &window[window.len() - 1];
            let passed = match trend {
                Some(Trend::Rising) => last > n,
                Some(Trend::Falling) => last < n,
                Some(Trend::Widening) => exceeds(last, n),
                None => {
                    unclassified += 1;
                    if unclassified > config.scan_limit {
                        log::debug!("no regime found for the sequence while looking for {}", n);
                        return Err(SeqError::ScanLimit {
                            limit: config.scan_limit,
                        });
                    }
                    false
                }
            };
            if passed {
                log::trace!("{} is skipped by the sequence at {}", n, last);
                return Ok(false);
            }

            if lam == power {
                saved = window.clone();
                power *= 2;
                lam = 0;
            }
        }

        match stream.checked_next() {
            Some(term) if &term == n => return Ok(true),
            Some(_) => {}
            // a proven regime moves every later term out of the range of T as well
            None if trend.is_some() => {
                log::trace!("the sequence outgrows the integer type before reaching {}", n);
                return Ok(false);
            }
            None => {
                log::debug!("the sequence overflowed in no regime while looking for {}", n);
                return Err(SeqError::Overflow);
            }
        }
        lam += 1;

        if stream.window() == &saved {
            log::trace!("the sequence repeats with period {} without reaching {}", lam, n);
            return Ok(false);
        }
    }
}
