//! Precomputed tables

/// All primes below 256, sorted
pub const SMALL_PRIMES: [u8; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53,
    59, 61, 67, 71, 73, 79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131,
    137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223,
    227, 229, 233, 239, 241, 251,
];

/// Primes that make up the sieve wheel, the wheel size is their product
pub const WHEEL_PRIMES: [u64; 5] = [2, 3, 5, 7, 11];

/// 2 * 3 * 5 * 7 * 11
pub const WHEEL_SIZE: u64 = 2310;

/// A list of Carmichael numbers (OEIS A002997), used as adversarial inputs for probable prime tests
#[cfg(test)]
pub const CARMICHAEL: [u64; 16] = [
    561, 1105, 1729, 2465, 2821, 6601, 8911, 10585, 15841, 29341, 41041, 46657, 52633, 62745,
    63973, 75361,
];
