use crate::traits::RandWitness;
#[cfg(feature = "num-bigint")]
use num_bigint::{BigUint, RandBigInt};
use rand::Rng;

macro_rules! impl_randwitness_prim {
    ($($T:ty)*) => {$(
        impl<R: Rng> RandWitness<$T> for R {
            #[inline]
            fn gen_witness(&mut self, n: &$T) -> $T {
                if *n < 5 {
                    panic!("Witness bases are only defined for targets larger than 4!")
                }
                self.gen_range(2..=*n - 2)
            }
        }
    )*}
}
impl_randwitness_prim!(u8 u16 u32 u64 u128 usize);

#[cfg(feature = "num-bigint")]
impl<R: Rng> RandWitness<BigUint> for R {
    #[inline]
    fn gen_witness(&mut self, n: &BigUint) -> BigUint {
        if n < &BigUint::from(5u8) {
            panic!("Witness bases are only defined for targets larger than 4!")
        }
        // upper bound is exclusive
        self.gen_biguint_range(&BigUint::from(2u8), &(n - 1u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn witness_range() {
        let mut rng = StdRng::seed_from_u64(7);

        // the only choice for 5 is 2..=3
        for _ in 0..100 {
            let a: u8 = rng.gen_witness(&5);
            assert!(a == 2 || a == 3);
        }
        for _ in 0..1000 {
            let n = rng.gen_range(5u64..1_000_000);
            let a = rng.gen_witness(&n);
            assert!(2 <= a && a <= n - 2);
        }

        #[cfg(feature = "num-bigint")]
        {
            let n = BigUint::from(2u8).pow(89) - 1u8;
            for _ in 0..100 {
                let a = rng.gen_witness(&n);
                assert!(a >= BigUint::from(2u8) && a <= &n - 2u8);
            }
        }
    }
}
