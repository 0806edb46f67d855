use crate::core::Gate;
use crate::core::errors::{InputError, StateError};
use crate::core::measurements::{Basis, MeasurementResult};
use ndarray::{Array1, array};
use num_complex::Complex64;
use rand::Rng;

/// Amplitude vector of a single transmitted symbol.
///
/// A `SymbolState` lives only for the duration of one transmission step:
/// measuring it consumes the value, mirroring collapse.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolState {
    amplitudes: Array1<Complex64>,
}

impl Default for SymbolState {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolState {
    /// Creates the computational basis state |0>.
    pub fn new() -> Self {
        Self {
            amplitudes: array![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        }
    }

    /// Creates a SymbolState from an arbitrary two-component vector.
    pub fn from_state_vector(vector: Array1<Complex64>) -> Result<Self, StateError> {
        if vector.len() != 2 {
            return Err(StateError::InvalidDimensions(vector.len()));
        }

        if let Some(bad) = vector.iter().find(|c| !c.re.is_finite() || !c.im.is_finite()) {
            return Err(StateError::NonFinite(*bad));
        }

        // Sum of squared amplitudes must be 1.
        let norm_sqr: f64 = vector.iter().map(|c| c.norm_sqr()).sum();
        if (norm_sqr - 1.0).abs() > 1e-12 {
            return Err(StateError::NotNormalized(norm_sqr));
        }

        Ok(Self { amplitudes: vector })
    }

    /// Prepares `bit` in `basis`: X when the bit is 1, then H for the diagonal basis.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidBit` if `bit` is not 0 or 1.
    pub fn encode(bit: u8, basis: Basis) -> Result<Self, InputError> {
        validate_bit(bit)?;
        let mut state = Self::new();
        if bit == 1 {
            state.apply(&Gate::x());
        }
        if basis == Basis::Diagonal {
            state.apply(&Gate::h());
        }
        Ok(state)
    }

    /// Applies a single-symbol gate.
    pub fn apply(&mut self, gate: &Gate) {
        self.amplitudes = gate.matrix.dot(&self.amplitudes);
    }

    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Outcome probabilities `[p(0), p(1)]` when measured in `basis`.
    pub fn probabilities(&self, basis: Basis) -> Vec<f64> {
        basis.measurement().probabilities(&self.amplitudes)
    }

    /// Randomly selects operator index ponderating using `probs`
    fn pick_outcome<R: Rng + ?Sized>(probs: &[f64], rng: &mut R) -> usize {
        let roll: f64 = rng.random();

        let mut cumulative = 0.0;
        for (i, &p) in probs.iter().enumerate() {
            cumulative += p;
            if roll < cumulative {
                return i;
            }
        }
        probs.len().saturating_sub(1)
    }

    /// Measures the symbol in `basis`, consuming it.
    ///
    /// Exactly one uniform draw is taken from `rng` whatever the outcome
    /// distribution, so runs with the same seed stay index-aligned.
    pub fn measure<R: Rng + ?Sized>(self, basis: Basis, rng: &mut R) -> MeasurementResult {
        let measurement = basis.measurement();
        let probs = measurement.probabilities(&self.amplitudes);
        let index = Self::pick_outcome(&probs, rng);

        MeasurementResult {
            index,
            value: measurement.values[index],
        }
    }
}

/// Ket notation for a prepared symbol.
pub fn state_label(bit: u8, basis: Basis) -> Result<&'static str, InputError> {
    validate_bit(bit)?;
    Ok(match (basis, bit) {
        (Basis::Rectilinear, 0) => "|0⟩",
        (Basis::Rectilinear, _) => "|1⟩",
        (Basis::Diagonal, 0) => "|+⟩",
        (Basis::Diagonal, _) => "|−⟩",
    })
}

fn validate_bit(bit: u8) -> Result<(), InputError> {
    if bit > 1 {
        return Err(InputError::InvalidBit {
            field: "bit",
            index: 0,
            value: bit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx(a: Complex64, re: f64) -> bool {
        (a - Complex64::new(re, 0.0)).norm() < 1e-12
    }

    #[test]
    fn encodes_rectilinear_states() {
        let zero = SymbolState::encode(0, Basis::Rectilinear).unwrap();
        assert!(approx(zero.amplitudes()[0], 1.0) && approx(zero.amplitudes()[1], 0.0));

        let one = SymbolState::encode(1, Basis::Rectilinear).unwrap();
        assert!(approx(one.amplitudes()[0], 0.0) && approx(one.amplitudes()[1], 1.0));
    }

    #[test]
    fn encodes_diagonal_states() {
        let s = 1.0 / 2.0_f64.sqrt();

        let plus = SymbolState::encode(0, Basis::Diagonal).unwrap();
        assert!(approx(plus.amplitudes()[0], s) && approx(plus.amplitudes()[1], s));

        let minus = SymbolState::encode(1, Basis::Diagonal).unwrap();
        assert!(approx(minus.amplitudes()[0], s) && approx(minus.amplitudes()[1], -s));
    }

    #[test]
    fn matched_basis_probabilities_are_exact() {
        for basis in [Basis::Rectilinear, Basis::Diagonal] {
            for bit in 0..=1u8 {
                let probs = SymbolState::encode(bit, basis).unwrap().probabilities(basis);
                let expected = if bit == 0 { [1.0, 0.0] } else { [0.0, 1.0] };
                assert_eq!(probs, expected.to_vec());
            }
        }
    }

    #[test]
    fn mismatched_basis_is_uniform() {
        for basis in [Basis::Rectilinear, Basis::Diagonal] {
            for bit in 0..=1u8 {
                let state = SymbolState::encode(bit, basis).unwrap();
                let probs = state.probabilities(basis.opposite());
                assert!((probs[0] - 0.5).abs() < 1e-12);
                assert!((probs[1] - 0.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn matched_measurement_returns_encoded_bit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            for basis in [Basis::Rectilinear, Basis::Diagonal] {
                for bit in 0..=1u8 {
                    let result = SymbolState::encode(bit, basis).unwrap().measure(basis, &mut rng);
                    assert_eq!(result.value, bit);
                }
            }
        }
    }

    #[test]
    fn rejects_unnormalized_vector() {
        let v = array![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)];
        assert!(matches!(
            SymbolState::from_state_vector(v),
            Err(StateError::NotNormalized(_))
        ));

        let v = array![Complex64::new(1.0, 0.0)];
        assert_eq!(
            SymbolState::from_state_vector(v),
            Err(StateError::InvalidDimensions(1))
        );
    }

    #[test]
    fn rejects_non_binary_bit() {
        let err = InputError::InvalidBit {
            field: "bit",
            index: 0,
            value: 2,
        };
        assert_eq!(SymbolState::encode(2, Basis::Rectilinear), Err(err.clone()));
        assert_eq!(SymbolState::encode(2, Basis::Diagonal), Err(err.clone()));
        assert_eq!(state_label(2, Basis::Rectilinear), Err(err));
    }

    #[test]
    fn labels() {
        assert_eq!(state_label(0, Basis::Rectilinear).unwrap(), "|0⟩");
        assert_eq!(state_label(1, Basis::Rectilinear).unwrap(), "|1⟩");
        assert_eq!(state_label(0, Basis::Diagonal).unwrap(), "|+⟩");
        assert_eq!(state_label(1, Basis::Diagonal).unwrap(), "|−⟩");
    }
}
