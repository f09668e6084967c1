use num_seq::seq_funcs::{fibonacci_stream, miller_rabin};
use num_seq::SeqError;

/// Find the Tribonacci numbers below 2^63 that are (probable) primes
fn tribonacci_primes() -> Result<Vec<u64>, SeqError> {
    let mut found = Vec::new();
    for t in fibonacci_stream(&[0i64, 0, 1])?.take_while(|t| *t < i64::MAX / 3) {
        let t = t as u64;
        if miller_rabin(&t, 16)? {
            found.push(t);
        }
    }
    Ok(found)
}

fn main() -> Result<(), SeqError> {
    println!("Tribonacci primes under 2^63:");
    for p in tribonacci_primes()? {
        println!("{}", p);
    }
    Ok(())
}
