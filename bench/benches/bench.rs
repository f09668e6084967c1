#[macro_use]
extern crate criterion;
use criterion::{BenchmarkId, Criterion, SamplingMode};
use num_bigint::BigInt;
use num_seq::seq_funcs::{fibonacci_stream, is_fibonacci, is_prime, nth_fibonacci, prime_sieve, prime_stream};
use num_seq::{MillerRabin, MillerRabinConfig};
use primal_check::miller_rabin;
use rand::{rngs::StdRng, SeedableRng};

pub fn bench_nth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nth tribonacci (BigInt)");
    let seed = [BigInt::from(0), BigInt::from(0), BigInt::from(1)];

    for &n in [100usize, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("matrix power", n), &n, |b, &n| {
            b.iter(|| nth_fibonacci(n, &seed).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("stream", n), &n, |b, &n| {
            b.iter(|| fibonacci_stream(&seed).unwrap().nth(n).unwrap())
        });
    }
    group.finish();
}

pub fn bench_membership(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_fibonacci (i128)");
    let numbers = || (0..100_000i128).step_by(7).chain((1i128 << 40..(1i128 << 40) + 1000).step_by(7));

    group.bench_function("closed form (0, 1)", |b| {
        b.iter(|| numbers().filter(|n| is_fibonacci(n, &[0, 1]).unwrap()).count())
    });
    group.bench_function("scan (2, 1)", |b| {
        b.iter(|| numbers().filter(|n| is_fibonacci(n, &[2, 1]).unwrap()).count())
    });
    group.finish();
}

pub fn bench_is_prime(c: &mut Criterion) {
    const N0: u64 = 1_000_000;
    const STEP: usize = 101;
    const N1: u64 = 8_000_000_000; // larger than u32
    const N2: u64 = N1 + N0;

    let numbers = || (1..N0).step_by(STEP).chain((N1..N2).step_by(STEP));

    let mut group = c.benchmark_group("is_prime (u64)");
    group.sampling_mode(SamplingMode::Flat);

    group.bench_function("trial division", |b| {
        b.iter(|| numbers().filter(|n| is_prime(n)).count())
    });
    let mut mr = MillerRabin::with_rng(MillerRabinConfig::default(), StdRng::seed_from_u64(0));
    group.bench_function("miller-rabin (8 rounds)", |b| {
        b.iter(|| numbers().filter(|n| mr.test(n)).count())
    });
    group.bench_function("primal-check", |b| {
        b.iter(|| numbers().filter(|&n| miller_rabin(n)).count())
    });
    group.finish();
}

pub fn bench_prime_gen(c: &mut Criterion) {
    let mut group = c.benchmark_group("first 10000 primes");
    group.sample_size(10);

    group.bench_function("wheel sieve", |b| b.iter(|| prime_sieve().nth(9999)));
    group.bench_function("trial division", |b| {
        b.iter(|| prime_stream::<u64>().nth(9999))
    });
    group.finish();
}

criterion_group!(benches, bench_nth, bench_membership, bench_is_prime, bench_prime_gen);
criterion_main!(benches);
