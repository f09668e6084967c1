//! Linear recurrences: seed terms, update rules and the lazy streams driven by them

use crate::error::SeqError;
use crate::traits::{RecurrenceBase, RecurrenceRule, Trend};
use num_traits::RefNum;
use std::collections::VecDeque;

/// The seed terms `(a_0, a_1, ..., a_{k-1})` of a linear recurrence of order k.
///
/// The seed is validated once at construction and is immutable afterwards. Each
/// stream built from it keeps its own copy, so independent consumers never share a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceState<T> {
    terms: Vec<T>,
}

impl<T: RecurrenceBase> RecurrenceState<T> {
    /// Returns [SeqError::InvalidSeed] if `terms` is empty
    pub fn new(terms: Vec<T>) -> Result<Self, SeqError> {
        if terms.is_empty() {
            return Err(SeqError::seed("the seed must contain at least one term"));
        }
        Ok(Self { terms })
    }

    pub fn from_slice(terms: &[T]) -> Result<Self, SeqError> {
        Self::new(terms.to_vec())
    }

    /// Seed (0, 1) of the Fibonacci numbers
    pub fn fibonacci() -> Self {
        Self {
            terms: vec![T::zero(), T::one()],
        }
    }

    /// Seed (2, 1) of the Lucas numbers
    pub fn lucas_numbers() -> Self {
        Self {
            terms: vec![T::one() + T::one(), T::one()],
        }
    }

    /// Seed (0, 0, 1) of the Tribonacci numbers
    pub fn tribonacci() -> Self {
        Self {
            terms: vec![T::zero(), T::zero(), T::one()],
        }
    }

    /// Seed (0, 0, 0, 1) of the Tetranacci numbers
    pub fn tetranacci() -> Self {
        Self {
            terms: vec![T::zero(), T::zero(), T::zero(), T::one()],
        }
    }

    /// The order k of the recurrence, i.e. the number of seed terms
    #[inline]
    pub fn order(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn terms(&self) -> &[T] {
        &self.terms
    }

    pub(crate) fn is_canonical_fibonacci(&self) -> bool {
        self.terms.len() == 2 && self.terms[0].is_zero() && self.terms[1].is_one()
    }
}

impl<T: RecurrenceBase> Default for RecurrenceState<T> {
    fn default() -> Self {
        Self::fibonacci()
    }
}

/// Generalized Fibonacci rule: each term is the sum of the previous k terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumRule;

impl<T: RecurrenceBase> RecurrenceRule<T> for SumRule
where
    for<'r> &'r T: RefNum<T>,
{
    fn check_order(&self, order: usize) -> Result<(), SeqError> {
        if order == 0 {
            return Err(SeqError::seed("the seed must contain at least one term"));
        }
        Ok(())
    }

    #[inline]
    fn next_term(&self, window: &VecDeque<T>) -> T {
        window.iter().fold(T::zero(), |acc, t| acc + t)
    }

    fn checked_next_term(&self, window: &VecDeque<T>) -> Option<T> {
        // add a term of the opposite sign while one is left, so that the partial
        // sums only overflow once the final sum does
        let (mut neg, mut pos): (Vec<&T>, Vec<&T>) = window.iter().partition(|t| t.is_negative());
        let mut acc = T::zero();
        loop {
            let next = if acc.is_negative() {
                pos.pop().or_else(|| neg.pop())
            } else {
                neg.pop().or_else(|| pos.pop())
            };
            match next {
                Some(t) => acc = acc.checked_add(t)?,
                None => return Some(acc),
            }
        }
    }

    fn trend(&self, window: &VecDeque<T>) -> Option<Trend> {
        // a sum of non-negative terms is no smaller than any of them, and symmetrically
        if window.iter().all(|t| !t.is_negative()) {
            Some(Trend::Rising)
        } else if window.iter().all(|t| !t.is_positive()) {
            Some(Trend::Falling)
        } else {
            None
        }
    }
}

/// Parameters (P, Q) of the Lucas sequence `U(n) = P * U(n-1) - Q * U(n-2)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LucasParams<T> {
    p: T,
    q: T,
}

impl<T: RecurrenceBase> LucasParams<T> {
    pub fn new(p: T, q: T) -> Self {
        Self { p, q }
    }

    /// P = 2, Q = -1, which yields the Pell numbers from seed (0, 1)
    pub fn pell() -> Self {
        Self::new(T::one() + T::one(), -T::one())
    }

    /// P = 1, Q = -1, which yields the Fibonacci numbers from seed (0, 1)
    /// and the Lucas numbers from seed (2, 1)
    pub fn fibonacci() -> Self {
        Self::new(T::one(), -T::one())
    }

    #[inline]
    pub fn p(&self) -> &T {
        &self.p
    }

    #[inline]
    pub fn q(&self) -> &T {
        &self.q
    }
}

impl<T: RecurrenceBase> Default for LucasParams<T> {
    fn default() -> Self {
        Self::pell()
    }
}

/// Find the smallest integer c with 1 <= c <= P and c² - Pc + Q <= 0.
///
/// When it exists, `0 <= a` and `c*a <= b` imply `c*b <= P*b - Q*a`, so a
/// window (a, b) in that cone stays in it and the sequence never decreases.
fn growth_ratio<T: RecurrenceBase>(p: &T, q: &T) -> Option<T>
where
    for<'r> &'r T: RefNum<T>,
{
    let two = T::one() + T::one();
    let four = &two + &two;
    let disc = p.checked_mul(p)?.checked_sub(&four.checked_mul(q)?)?;
    if disc.is_negative() {
        return None; // complex roots
    }

    // the smaller root (P - sqrt(D)) / 2 lies in ((P - s - 1) / 2, (P - s) / 2]
    let s = disc.sqrt();
    let mut c = (p - &s - T::one()).div_floor(&two);
    if c < T::one() {
        c = T::one();
    }
    for _ in 0..4 {
        if &c > p {
            break;
        }
        // c² - Pc + Q
        if c.checked_mul(&(&c - p))?.checked_add(q)? <= T::zero() {
            return Some(c);
        }
        c = c + T::one();
    }
    None
}

/// Test whether |t| > |n|, without taking absolute values that may overflow
pub(crate) fn exceeds<T: RecurrenceBase>(t: &T, n: &T) -> bool {
    match (t.is_negative(), n.is_negative()) {
        (false, false) => t > n,
        (true, true) => t < n,
        (false, true) => (t.clone() + n.clone()).is_positive(),
        (true, false) => (t.clone() + n.clone()).is_negative(),
    }
}

/// Test whether n = start * ratio^j for some j >= 1
fn geometric_reaches<T: RecurrenceBase>(start: &T, ratio: &T, n: &T) -> bool {
    // with |ratio| <= 1 the progression takes at most two distinct values
    let bounded = !exceeds(ratio, &T::one());
    let mut term = start.clone();
    let mut steps = 0;
    loop {
        term = match term.checked_mul(ratio) {
            Some(t) => t,
            None => return false,
        };
        steps += 1;
        if &term == n {
            return true;
        }
        if term.is_zero() || exceeds(&term, n) || (bounded && steps == 2) {
            return false;
        }
    }
}

/// The rule `U(n) = P * U(n-1) - Q * U(n-2)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LucasRule<T> {
    params: LucasParams<T>,
    /// growth ratio of U(n)
    ratio: Option<T>,
    /// growth ratio of (-1)^n U(n), which is driven by (-P, Q)
    twisted_ratio: Option<T>,
}

impl<T: RecurrenceBase> LucasRule<T>
where
    for<'r> &'r T: RefNum<T>,
{
    pub fn new(params: LucasParams<T>) -> Self {
        let ratio = growth_ratio(&params.p, &params.q);
        let twisted_ratio = T::zero()
            .checked_sub(&params.p)
            .and_then(|neg_p| growth_ratio(&neg_p, &params.q));
        Self {
            params,
            ratio,
            twisted_ratio,
        }
    }

    #[inline]
    pub fn params(&self) -> &LucasParams<T> {
        &self.params
    }
}

impl<T: RecurrenceBase> RecurrenceRule<T> for LucasRule<T>
where
    for<'r> &'r T: RefNum<T>,
{
    fn check_order(&self, order: usize) -> Result<(), SeqError> {
        if order != 2 {
            return Err(SeqError::seed(format!(
                "a lucas sequence needs exactly 2 seed terms, got {}",
                order
            )));
        }
        Ok(())
    }

    #[inline]
    fn next_term(&self, window: &VecDeque<T>) -> T {
        &self.params.p * &window[1] - &self.params.q * &window[0]
    }

    fn checked_next_term(&self, window: &VecDeque<T>) -> Option<T> {
        let (p, q) = (&self.params.p, &self.params.q);
        let (a, b) = (&window[0], &window[1]);
        let direct = || p.checked_mul(b)?.checked_sub(&q.checked_mul(a)?);
        // P*b - Q*a = P*(b - a) + (P - Q)*a = Q*(b - a) + (P - Q)*b, where the products
        // stay small for terms of a growing sequence
        let regrouped = |x: &T, y: &T| {
            let d = b.checked_sub(a)?;
            let r = p.checked_sub(q)?;
            x.checked_mul(&d)?.checked_add(&r.checked_mul(y)?)
        };
        direct()
            .or_else(|| regrouped(p, a))
            .or_else(|| regrouped(q, b))
    }

    fn trend(&self, window: &VecDeque<T>) -> Option<Trend> {
        let (a, b) = (&window[0], &window[1]);

        // an overflowing product can only leave the cones below
        if let Some(ca) = self.ratio.as_ref().and_then(|c| c.checked_mul(a)) {
            if !a.is_negative() && &ca <= b {
                return Some(Trend::Rising);
            }
            // the negated sequence follows the same rule
            if !a.is_positive() && &ca >= b {
                return Some(Trend::Falling);
            }
        }

        // (-1)^n U(n) with the sign chosen so that the last term is non-negative
        // rises, i.e. c*|a| <= |b| with a and b of opposite signs
        if let Some(ca) = self.twisted_ratio.as_ref().and_then(|c| c.checked_mul(a)) {
            let widening = if b.is_negative() {
                !a.is_negative() && !(ca + b).is_positive()
            } else {
                !a.is_positive() && !(ca + b).is_negative()
            };
            if widening {
                return Some(Trend::Widening);
            }
        }
        None
    }

    fn search(&self, window: &VecDeque<T>, n: &T) -> Option<bool> {
        if !self.params.p.is_zero() {
            return None;
        }
        // U(n+2) = -Q * U(n), both window terms start a geometric progression
        let ratio = T::zero().checked_sub(&self.params.q)?;
        Some(window.iter().any(|t| geometric_reaches(t, &ratio, n)))
    }
}

/// A lazy, unbounded stream of the terms F(0), F(1), ... of a linear recurrence.
///
/// The seed terms are yielded first, then every pull computes one more term from
/// the window of the last k terms.
#[derive(Debug, Clone)]
pub struct RecurrenceStream<T, R> {
    seed: RecurrenceState<T>,
    rule: R,
    window: VecDeque<T>,
    emitted: usize,
}

/// Stream of a generalized Fibonacci sequence
pub type FibonacciStream<T> = RecurrenceStream<T, SumRule>;

/// Stream of a Lucas (P, Q) sequence
pub type LucasStream<T> = RecurrenceStream<T, LucasRule<T>>;

impl<T: RecurrenceBase, R: RecurrenceRule<T>> RecurrenceStream<T, R> {
    pub fn new(seed: RecurrenceState<T>, rule: R) -> Result<Self, SeqError> {
        rule.check_order(seed.order())?;
        let window = seed.terms().iter().cloned().collect();
        Ok(Self {
            seed,
            rule,
            window,
            emitted: 0,
        })
    }

    /// Rewind the stream to F(0)
    pub fn restart(&mut self) {
        self.window = self.seed.terms().iter().cloned().collect();
        self.emitted = 0;
    }

    #[inline]
    pub fn seed(&self) -> &RecurrenceState<T> {
        &self.seed
    }

    #[inline]
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// The last k generated terms (the seed before any term past it is computed)
    #[inline]
    pub fn window(&self) -> &VecDeque<T> {
        &self.window
    }

    /// Same as [Iterator::next], but returns None when the next term doesn't fit in `T`.
    /// The stream isn't advanced in that case.
    pub fn checked_next(&mut self) -> Option<T> {
        if let Some(term) = self.next_seed_term() {
            return Some(term);
        }
        let term = self.rule.checked_next_term(&self.window)?;
        Some(self.push(term))
    }

    fn next_seed_term(&mut self) -> Option<T> {
        if self.emitted < self.seed.order() {
            self.emitted += 1;
            return Some(self.seed.terms()[self.emitted - 1].clone());
        }
        None
    }

    fn push(&mut self, term: T) -> T {
        self.window.pop_front();
        self.window.push_back(term.clone());
        term
    }
}

impl<T: RecurrenceBase, R: RecurrenceRule<T>> Iterator for RecurrenceStream<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(term) = self.next_seed_term() {
            return Some(term);
        }
        let term = self.rule.next_term(&self.window);
        Some(self.push(term))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// A lazy, unbounded stream of the terms F(0), F(-1), F(-2), ... of a generalized
/// Fibonacci sequence, obtained by solving `F(n) = F(n-1) + ... + F(n-k)` for F(n-k).
#[derive(Debug, Clone)]
pub struct NegaFibonacciStream<T> {
    seed: RecurrenceState<T>,
    /// F(m), ..., F(m+k-1) where F(m) is the last yielded term
    window: VecDeque<T>,
    started: bool,
}

impl<T: RecurrenceBase> NegaFibonacciStream<T>
where
    for<'r> &'r T: RefNum<T>,
{
    pub fn new(seed: RecurrenceState<T>) -> Self {
        let window = seed.terms().iter().cloned().collect();
        Self {
            seed,
            window,
            started: false,
        }
    }

    /// Rewind the stream to F(0)
    pub fn restart(&mut self) {
        self.window = self.seed.terms().iter().cloned().collect();
        self.started = false;
    }
}

impl<T: RecurrenceBase> Iterator for NegaFibonacciStream<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if !self.started {
            self.started = true;
            return self.window.front().cloned();
        }

        // F(m-1) = F(m+k-1) - (F(m) + ... + F(m+k-2))
        let k = self.window.len();
        let rest = self
            .window
            .iter()
            .take(k - 1)
            .fold(T::zero(), |acc, t| acc + t);
        let newest = self.window.pop_back()?;
        let term = newest - rest;
        self.window.push_front(term.clone());
        Some(term)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
