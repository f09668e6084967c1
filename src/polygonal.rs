//! Polygonal numbers P(s, n) = n + (s - 2) * n * (n - 1) / 2

use crate::error::SeqError;
use crate::traits::ExactRoots;
use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, NumRef, RefNum};

fn check_sides<T: FromPrimitive>(sides: usize) -> Result<T, SeqError> {
    if sides < 3 {
        return Err(SeqError::InvalidSides { sides });
    }
    T::from_usize(sides).ok_or(SeqError::InvalidSides { sides })
}

/// A lazy stream of the s-gonal numbers P(s, 1), P(s, 2), ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonalStream<T> {
    /// s - 2
    step: T,
    /// n of the last yielded term
    index: T,
    value: T,
}

impl<T: Integer + Clone + FromPrimitive + NumRef> PolygonalStream<T>
where
    for<'r> &'r T: RefNum<T>,
{
    pub fn new(sides: usize) -> Result<Self, SeqError> {
        let s: T = check_sides(sides)?;
        Ok(Self {
            step: s - T::one() - T::one(),
            index: T::zero(),
            value: T::zero(),
        })
    }

    /// Rewind the stream to P(s, 1)
    pub fn restart(&mut self) {
        self.index = T::zero();
        self.value = T::zero();
    }
}

impl<T: Integer + Clone + FromPrimitive + NumRef> Iterator for PolygonalStream<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        // P(s, n+1) - P(s, n) = 1 + (s - 2) * n
        let diff = &self.step * &self.index + T::one();
        self.value = &self.value + diff;
        self.index = &self.index + T::one();
        Some(self.value.clone())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// P(s, m) with `step` = s - 2, or None if it doesn't fit in `T`
fn polygonal_at<T: Integer + Clone + NumRef + CheckedAdd + CheckedMul>(step: &T, m: &T) -> Option<T>
where
    for<'r> &'r T: RefNum<T>,
{
    let two = T::one() + T::one();
    let prev = m - T::one();
    let half_product = if m.is_even() {
        (m / &two).checked_mul(&prev)?
    } else {
        m.checked_mul(&(prev / two))?
    };
    step.checked_mul(&half_product)?.checked_add(m)
}

/// Test whether n = P(s, m) for some m >= 1.
///
/// Solving the quadratic for m gives `m = (sqrt(D) + s - 4) / (2(s - 2))` with
/// `D = 8(s - 2)n + (s - 4)²`, so n is s-gonal iff D is a perfect square and the
/// division is exact. When D doesn't fit in `T`, m is found by bisection instead.
pub fn is_polygonal<T>(n: &T, sides: usize) -> Result<bool, SeqError>
where
    T: Integer + Clone + FromPrimitive + NumRef + CheckedAdd + CheckedMul + ExactRoots,
    for<'r> &'r T: RefNum<T>,
{
    let s: T = check_sides(sides)?;
    if n <= &T::zero() {
        return Ok(false);
    }

    let two = T::one() + T::one();
    let four = &two + &two;
    let step = &s - &two;
    let offset = if sides >= 4 {
        &s - &four
    } else {
        &four - &s
    };
    let disc = step
        .checked_mul(n)
        .and_then(|x| x.checked_mul(&(&four + &four)))
        .and_then(|x| x.checked_add(&offset.checked_mul(&offset)?));
    let disc = match disc {
        Some(d) => d,
        None => return Ok(bisect_polygonal(&step, n)),
    };

    let root = match disc.sqrt_exact() {
        Some(r) => r,
        None => return Ok(false),
    };
    // root >= 3 since n >= 1, so this stays non-negative for unsigned types
    let numerator = root + s - four;
    Ok(numerator.is_multiple_of(&(two * step)))
}

/// Search m in [1, n] with P(s, m) = n, using that P(s, m) >= m increases with m
fn bisect_polygonal<T: Integer + Clone + NumRef + CheckedAdd + CheckedMul>(step: &T, n: &T) -> bool
where
    for<'r> &'r T: RefNum<T>,
{
    let (mut lo, mut hi) = (T::one(), n.clone());
    while lo <= hi {
        let mid = &lo + (&hi - &lo) / (T::one() + T::one());
        match polygonal_at(step, &mid) {
            Some(v) if &v == n => return true,
            Some(v) if &v < n => lo = mid + T::one(),
            // mid >= 1, so this can't underflow
            _ => hi = mid - T::one(),
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Roots;
    use std::collections::BTreeSet;

    #[test]
    fn polygonal_stream_test() {
        let triangular: Vec<u32> = PolygonalStream::new(3).unwrap().take(5).collect();
        assert_eq!(triangular, [1, 3, 6, 10, 15]);
        let square: Vec<i64> = PolygonalStream::new(4).unwrap().take(6).collect();
        assert_eq!(square, [1, 4, 9, 16, 25, 36]);
        let pentagonal: Vec<i64> = PolygonalStream::new(5).unwrap().take(6).collect();
        assert_eq!(pentagonal, [1, 5, 12, 22, 35, 51]);

        // P(s, n) = ((s - 2) n² - (s - 4) n) / 2
        for s in 3..20i64 {
            let stream = PolygonalStream::<i64>::new(s as usize).unwrap();
            for (n, p) in (1..200i64).zip(stream) {
                assert_eq!(p, ((s - 2) * n * n - (s - 4) * n) / 2);
            }
        }

        let mut stream = PolygonalStream::<u64>::new(6).unwrap();
        let first: Vec<u64> = stream.by_ref().take(10).collect();
        stream.restart();
        assert_eq!(stream.take(10).collect::<Vec<_>>(), first);
    }

    #[test]
    fn is_polygonal_test() {
        assert_eq!(is_polygonal(&15u32, 3), Ok(true));
        assert_eq!(is_polygonal(&16u32, 3), Ok(false));
        assert_eq!(is_polygonal(&16i32, 4), Ok(true));
        assert_eq!(is_polygonal(&1i32, 7), Ok(true));
        assert_eq!(is_polygonal(&0i32, 3), Ok(false));
        assert_eq!(is_polygonal(&-6i32, 3), Ok(false));

        for s in 3..16usize {
            let members: BTreeSet<u64> = PolygonalStream::new(s).unwrap().take(200).collect();
            for n in 0..5000u64 {
                assert_eq!(is_polygonal(&n, s), Ok(members.contains(&n)), "n={}, s={}", n, s);
            }
        }
    }

    #[test]
    fn invalid_sides_test() {
        assert_eq!(
            PolygonalStream::<i64>::new(2).err(),
            Some(SeqError::InvalidSides { sides: 2 })
        );
        assert_eq!(is_polygonal(&3i64, 0), Err(SeqError::InvalidSides { sides: 0 }));
        assert_eq!(is_polygonal(&3u8, 300), Err(SeqError::InvalidSides { sides: 300 }));
    }
    #[test]
    fn is_polygonal_near_max_test() {
        // 8n + 1 doesn't fit in u64 for the largest triangular number in u64
        let t = 18446744070963499500u64; // P(3, 6074000999)
        assert_eq!(is_polygonal(&t, 3), Ok(true));
        assert_eq!(is_polygonal(&(t + 1), 3), Ok(false));
        assert_eq!(is_polygonal(&u64::MAX, 3), Ok(false));

        // largest square in i64
        assert_eq!(is_polygonal(&9223372030926249001i64, 4), Ok(true));
        assert_eq!(is_polygonal(&i64::MAX, 4), Ok(false));

        assert_eq!(is_polygonal(&120i8, 3), Ok(true));
        assert_eq!(is_polygonal(&121i8, 3), Ok(false));
        assert_eq!(is_polygonal(&i8::MAX, 5), Ok(false));

        // the wide type never needs the bisection for these
        let mut samples = vec![u64::MAX, u64::MAX - 1, t, t - 1, 1 << 63, 3 << 62];
        samples.extend((0..50).map(|_| rand::random::<u64>() | (1 << 63)));
        for s in 3..20usize {
            for &n in &samples {
                assert_eq!(is_polygonal(&n, s), is_polygonal(&(n as u128), s), "n={}, s={}", n, s);
            }
            // P(s, m) right below the limit of u64
            let step = s as u128 - 2;
            let m = ((2 * u64::MAX as u128) / step).sqrt() - 1;
            let p = step * m * (m - 1) / 2 + m;
            if p <= u64::MAX as u128 {
                assert_eq!(is_polygonal(&(p as u64), s), Ok(true), "s={}", s);
            }
        }
    }
}
