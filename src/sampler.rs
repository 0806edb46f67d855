use crate::core::errors::InputError;
use crate::{Basis, SymbolState};
use rand::Rng;

/// Repeated-shot measurement of a prepared symbol.
///
/// The `Sampler` prepares the same `(bit, basis)` symbol many times and
/// measures each copy, returning the empirical outcome distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampler {
    state: SymbolState,
}

/// Outcome tallies of a sampling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub zeros: usize,
    pub ones: usize,
}

impl Counts {
    pub fn total(&self) -> usize {
        self.zeros + self.ones
    }

    /// Fraction of shots that read `1`.
    pub fn ones_fraction(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.ones as f64 / self.total() as f64
        }
    }
}

impl Sampler {
    /// Creates a `Sampler` for the symbol encoding `bit` in `basis`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidBit` if `bit` is not 0 or 1.
    pub fn new(bit: u8, basis: Basis) -> Result<Self, InputError> {
        Ok(Self {
            state: SymbolState::encode(bit, basis)?,
        })
    }

    /// Measures a fresh copy of the symbol in `measure_basis` `num_shots` times.
    ///
    /// # Arguments
    ///
    /// * `measure_basis` - Basis used by the receiver.
    /// * `num_shots` - The number of times to repeat the measurement.
    /// * `rng` - Randomness source; pass a seeded generator for reproducible counts.
    pub fn run<R: Rng + ?Sized>(
        &self,
        measure_basis: Basis,
        num_shots: usize,
        rng: &mut R,
    ) -> Counts {
        let mut counts = Counts::default();

        for _ in 0..num_shots {
            match self.state.clone().measure(measure_basis, rng).value {
                0 => counts.zeros += 1,
                _ => counts.ones += 1,
            }
        }

        counts
    }
}
