//! Deterministic random source shared by the bots.
//!
//! Every bot owns its own [`RandomSource`]. It is the only source of
//! non-determinism of a search, so two bots built with the same seed and fed
//! the same states make exactly the same decisions.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Trait for a seedable generator of floating values in `[0, 1)`.
///
/// The same seed followed by the same sequence of calls must produce the same values.
pub trait RandomSource{
    /// Returns the next value, uniformly distributed in `[0, 1)`.
    fn random(&mut self) -> f64;

    /// Restarts the sequence from the given seed.
    fn reseed(&mut self, seed: u64);
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R{
    #[inline]
    fn random(&mut self) -> f64{
        (**self).random()
    }

    #[inline]
    fn reseed(&mut self, seed: u64){
        (**self).reseed(seed)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R>{
    #[inline]
    fn random(&mut self) -> f64{
        (**self).random()
    }

    #[inline]
    fn reseed(&mut self, seed: u64){
        (**self).reseed(seed)
    }
}

/// Default [`RandomSource`] backed by a seeded `StdRng`.
#[derive(Clone, Debug)]
pub struct SeededRandom{
    rng: StdRng,
    seed: u64
}

impl SeededRandom{
    /// Creates a new random source.
    ///
    /// # Parameters
    /// - `seed`: An optional seed. Providing `Some(value)` makes every run
    ///           reproducible. With `None`, a seed is derived from the current
    ///           time and can be read back with [`SeededRandom::seed`].
    pub fn new(seed: Option<u64>) -> Self{
        let seed = seed.unwrap_or_else(clock_seed);
        SeededRandom { rng: StdRng::seed_from_u64(seed), seed }
    }

    /// Returns the seed the current sequence started from.
    #[inline]
    pub fn seed(&self) -> u64{
        self.seed
    }
}

impl RandomSource for SeededRandom{
    #[inline]
    fn random(&mut self) -> f64{
        self.rng.random()
    }

    fn reseed(&mut self, seed: u64){
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
    }
}

/// Derives a seed from the system clock.
fn clock_seed() -> u64{
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| (elapsed.as_nanos() % u64::MAX as u128) as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence(){
        let mut a = SeededRandom::new(Some(7));
        let mut b = SeededRandom::new(Some(7));

        let xs: Vec<f64> = (0..16).map(|_| a.random()).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_range(){
        let mut random = SeededRandom::new(Some(1));

        for _ in 0..1000{
            let x = random.random();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_reseed(){
        let mut random = SeededRandom::new(Some(3));
        let first: Vec<f64> = (0..4).map(|_| random.random()).collect();

        random.reseed(3);
        let second: Vec<f64> = (0..4).map(|_| random.random()).collect();

        assert_eq!(first, second);
        assert_eq!(random.seed(), 3);
    }

    #[test]
    fn test_different_seeds(){
        let mut a = SeededRandom::new(Some(1));
        let mut b = SeededRandom::new(Some(2));

        let xs: Vec<f64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_boxed_source(){
        let mut boxed: Box<dyn RandomSource> = Box::new(SeededRandom::new(Some(9)));
        let mut plain = SeededRandom::new(Some(9));

        assert_eq!(boxed.random(), plain.random());
    }
}
