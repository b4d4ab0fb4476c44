use rand::{Rng, RngExt};

/// The randomness the generator consumes.
///
/// Every [`rand::Rng`] is a source; tests can plug in seeded generators or
/// hand-written scripts instead.
pub trait RandomSource {
    /// A uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// A uniform index in `0..n`. Returns 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.unit() * n as f64) as usize).min(n - 1)
    }

    /// Fisher-Yates shuffle in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.random()
    }

    #[inline]
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.random_range(0..n)
    }
}
