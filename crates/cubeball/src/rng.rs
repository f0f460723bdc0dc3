//! Random source consumed by the Monte Carlo layer.
//!
//! Every draw goes through [`RandomSource`] so tests can replay exact
//! sequences. Any `rand::Rng` is a source; the CLI seeds a
//! `rand::rngs::StdRng` once per run.

use rand::Rng;

pub trait RandomSource {
    /// Uniform integer in `[0, n)`; `n` must be positive.
    fn uniform_int(&mut self, n: usize) -> usize;
    /// Uniform real in `[0, 1)` with 53 random bits.
    fn uniform_real(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn uniform_int(&mut self, n: usize) -> usize {
        assert!(n > 0, "uniform_int needs a non-empty range");
        self.gen_range(0..n)
    }

    #[inline]
    fn uniform_real(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draws_stay_in_range_and_replay() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for n in 1..200usize {
            let i = a.uniform_int(n);
            assert!(i < n);
            assert_eq!(i, b.uniform_int(n));
            let u = a.uniform_real();
            assert!((0.0..1.0).contains(&u));
            assert_eq!(u, b.uniform_real());
        }
    }

    #[test]
    #[should_panic(expected = "non-empty range")]
    fn empty_range_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        rng.uniform_int(0);
    }
}
