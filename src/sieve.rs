//! Primality oracles over a bounded range `[0, max_number]`.
//!
//! [`PrimeSieve`] is the real thing (sieve of Eratosthenes). [`RandomSieve`]
//! is a control group: every number is selected by an independent weighted
//! coin flip, with the weight usually set to the prime sieve's density so
//! both render with a comparable number of points.

use crate::error::{SpiralError, SpiralResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

// ─── Classifier seam ────────────────────────────────────────────────────────

/// Anything that can classify the integers of a bounded range.
///
/// Implementations are immutable after construction, so a classifier can be
/// shared read-only between any number of readers.
pub trait Classifier {
    /// Inclusive upper bound of the classified range.
    fn max_number(&self) -> u64;

    /// Whether `number` is selected. Fails with [`SpiralError::OutOfRange`]
    /// when `number > max_number()`.
    fn query(&self, number: u64) -> SpiralResult<bool>;
}

// ─── Prime sieve ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSieve {
    max_number: u64,
    count: u64,
    /// `is_prime[n - 2]` for `n` in `[2, max_number]`; 0 and 1 are not stored.
    is_prime: Vec<bool>,
}

impl PrimeSieve {
    /// Sieve every integer up to and including `max_number`.
    pub fn new(max_number: u64) -> SpiralResult<Self> {
        if max_number < 2 {
            return Err(SpiralError::InvalidBound(max_number));
        }

        let len = usize::try_from(max_number - 1)
            .map_err(|_| SpiralError::InvalidBound(max_number))?;
        let mut is_prime = vec![true; len];
        let mut count = 0;

        for i in 2..=max_number {
            if !is_prime[(i - 2) as usize] {
                continue;
            }
            count += 1;

            // i itself stays prime; strike out 2i, 3i, ...
            let mut j = i + i;
            while j <= max_number {
                is_prime[(j - 2) as usize] = false;
                j += i;
            }
        }

        debug!(max_number, count, "prime sieve built");
        Ok(Self {
            max_number,
            count,
            is_prime,
        })
    }

    /// Number of primes in `[2, max_number]`.
    pub fn prime_count(&self) -> u64 {
        self.count
    }

    /// Fraction of the range that is prime: `prime_count / max_number`.
    pub fn density(&self) -> f64 {
        self.count as f64 / self.max_number as f64
    }

    /// All primes in ascending order.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.is_prime
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| i as u64 + 2)
    }
}

impl Classifier for PrimeSieve {
    fn max_number(&self) -> u64 {
        self.max_number
    }

    fn query(&self, number: u64) -> SpiralResult<bool> {
        if number < 2 {
            return Ok(false);
        }
        if number > self.max_number {
            return Err(SpiralError::OutOfRange {
                number,
                max: self.max_number,
            });
        }
        // number <= max_number, whose table length already fit in usize
        Ok(self.is_prime[(number - 2) as usize])
    }
}

// ─── Random control sieve ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomSieve {
    max_number: u64,
    /// One flag per number in `[0, max_number]`.
    selected: Vec<bool>,
}

impl RandomSieve {
    /// Build from system entropy. Output differs from run to run.
    pub fn new(max_number: u64, threshold: f64) -> SpiralResult<Self> {
        Self::with_rng(max_number, threshold, &mut StdRng::from_entropy())
    }

    /// Build from a fixed seed; the same seed always yields the same table.
    pub fn with_seed(max_number: u64, threshold: f64, seed: u64) -> SpiralResult<Self> {
        Self::with_rng(max_number, threshold, &mut StdRng::seed_from_u64(seed))
    }

    /// Build from a caller-supplied random source.
    ///
    /// Each number is selected when a uniform draw in `[0, 1)` falls below
    /// `threshold`, so 0 selects nothing and 1 selects everything.
    pub fn with_rng<R: Rng + ?Sized>(
        max_number: u64,
        threshold: f64,
        rng: &mut R,
    ) -> SpiralResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SpiralError::InvalidThreshold(threshold));
        }

        // the table holds max_number + 1 flags
        usize::try_from(max_number)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(SpiralError::InvalidBound(max_number))?;

        let selected: Vec<bool> = (0..=max_number)
            .map(|_| rng.gen::<f64>() < threshold)
            .collect();

        debug!(max_number, threshold, "random sieve built");
        Ok(Self {
            max_number,
            selected,
        })
    }

    /// Number of selected entries.
    pub fn selected_count(&self) -> u64 {
        self.selected.iter().filter(|&&s| s).count() as u64
    }

    /// Fraction of `[0, max_number]` that was selected.
    pub fn density(&self) -> f64 {
        self.selected_count() as f64 / self.selected.len() as f64
    }
}

impl Classifier for RandomSieve {
    fn max_number(&self) -> u64 {
        self.max_number
    }

    fn query(&self, number: u64) -> SpiralResult<bool> {
        if number > self.max_number {
            return Err(SpiralError::OutOfRange {
                number,
                max: self.max_number,
            });
        }
        Ok(self.selected[number as usize])
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
