//! Direct evaluation of generalized Fibonacci terms with powers of the companion matrix
//!
//! For a seed of order k the state vector `[F(n+k-1), ..., F(n)]` is advanced by
//! the companion matrix of `F(n) = F(n-1) + ... + F(n-k)`. The matrix is unimodular,
//! so its inverse has integer entries and moves the state towards negative indices.
//! Both are raised by repeated squaring, which takes O(k³ log |n|) multiplications.

use crate::recurrence::RecurrenceState;
use crate::traits::RecurrenceBase;
use num_traits::RefNum;

/// Square matrix in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
struct Matrix<T> {
    size: usize,
    data: Vec<T>,
}

impl<T: RecurrenceBase> Matrix<T>
where
    for<'r> &'r T: RefNum<T>,
{
    fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![T::zero(); size * size],
        }
    }

    fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m.set(i, i, T::one());
        }
        m
    }

    /// Maps `[F(n+k-1), ..., F(n)]` to `[F(n+k), ..., F(n+1)]`
    fn forward(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for j in 0..size {
            m.set(0, j, T::one());
        }
        for i in 1..size {
            m.set(i, i - 1, T::one());
        }
        m
    }

    /// Maps `[F(n+k-1), ..., F(n)]` to `[F(n+k-2), ..., F(n-1)]`
    fn backward(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size - 1 {
            m.set(i, i + 1, T::one());
        }
        // F(n-1) = F(n+k-1) - F(n+k-2) - ... - F(n)
        m.set(size - 1, 0, T::one());
        for j in 1..size {
            m.set(size - 1, j, -T::one());
        }
        m
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.size + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.size + col] = value;
    }

    fn mul(&self, rhs: &Self) -> Self {
        let k = self.size;
        let mut data = Vec::with_capacity(k * k);
        for i in 0..k {
            for j in 0..k {
                data.push((0..k).fold(T::zero(), |acc, l| acc + self.get(i, l) * rhs.get(l, j)));
            }
        }
        Self { size: k, data }
    }

    fn pow(&self, mut exp: u64) -> Self {
        let mut result = Self::identity(self.size);
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// Multiply the matrix with a column vector
    fn apply(&self, v: &[T]) -> Vec<T> {
        (0..self.size)
            .map(|i| {
                v.iter()
                    .enumerate()
                    .fold(T::zero(), |acc, (j, x)| acc + self.get(i, j) * x)
            })
            .collect()
    }
}

/// Compute F(n) of the generalized Fibonacci sequence started by `seed`, for any
/// index n (negative indices extend the sequence backwards), without enumerating
/// the terms in between.
pub fn nth_term<T: RecurrenceBase>(seed: &RecurrenceState<T>, n: i64) -> T
where
    for<'r> &'r T: RefNum<T>,
{
    let k = seed.order();
    if n >= 0 && (n as u64) < k as u64 {
        return seed.terms()[n as usize].clone();
    }
    log::trace!("fast evaluation of F({}) with an order {} recurrence", n, k);

    // state vector at index 0
    let state: Vec<T> = seed.terms().iter().rev().cloned().collect();
    if n > 0 {
        // [F(n), ..., F(n-k+1)] = M^(n-k+1) [F(k-1), ..., F(0)]
        let steps = n as u64 - (k as u64 - 1);
        let mut v = Matrix::forward(k).pow(steps).apply(&state);
        v.swap_remove(0)
    } else {
        // [F(n+k-1), ..., F(n)] = B^|n| [F(k-1), ..., F(0)]
        let mut v = Matrix::backward(k).pow(n.unsigned_abs()).apply(&state);
        v.swap_remove(k - 1)
    }
}
