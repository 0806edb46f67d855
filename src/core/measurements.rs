use crate::core::errors::MeasurementError;
use crate::core::utils;
use ndarray::{Array1, Array2, array};
use num_complex::Complex64;
use rand::Rng;
use std::fmt;

/// One of the two mutually unbiased BB84 bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basis {
    /// Z basis, `{|0>, |1>}`. Encoded as `0`.
    Rectilinear,
    /// X basis, `{|+>, |->}`. Encoded as `1`.
    Diagonal,
}

impl Basis {
    /// Decodes the integer representation used at the simulation boundary.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Basis::Rectilinear),
            1 => Some(Basis::Diagonal),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Basis::Rectilinear => 0,
            Basis::Diagonal => 1,
        }
    }

    /// The other basis of the pair.
    pub fn opposite(self) -> Self {
        match self {
            Basis::Rectilinear => Basis::Diagonal,
            Basis::Diagonal => Basis::Rectilinear,
        }
    }

    /// Draws a basis uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    /// Projective measurement associated with this basis.
    pub fn measurement(self) -> Measurement {
        match self {
            Basis::Rectilinear => Measurement::z_basis(),
            Basis::Diagonal => Measurement::x_basis(),
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Rectilinear => write!(f, "Z"),
            Basis::Diagonal => write!(f, "X"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Measurement {
    /// List of measurement operators
    pub operators: Vec<Array2<Complex64>>,
    /// Bit value reported for each operator
    pub values: Vec<u8>,
}

impl Measurement {
    pub fn new(
        operators: Vec<Array2<Complex64>>,
        values: Vec<u8>,
    ) -> Result<Self, MeasurementError> {
        if operators.len() != values.len() {
            return Err(MeasurementError::CountMismatch {
                ops: operators.len(),
                vals: values.len(),
            });
        }

        if operators.is_empty() {
            return Err(MeasurementError::InvalidDimensions);
        }

        for op in &operators {
            if op.dim() != (2, 2) {
                return Err(MeasurementError::InvalidDimensions);
            }
        }

        if !utils::check_completeness(&operators, 2) {
            return Err(MeasurementError::NotComplete);
        }

        Ok(Self { operators, values })
    }

    /// Outcome probabilities for a pure state, following the Born rule.
    ///
    /// Values below `1e-12` are snapped to zero and the result renormalized so
    /// matched-basis outcomes stay exactly deterministic.
    pub fn probabilities(&self, psi: &Array1<Complex64>) -> Vec<f64> {
        let mut probs: Vec<f64> = self
            .operators
            .iter()
            .map(|op| {
                let p = utils::expectation(op, psi).re;
                if p < 1e-12 { 0.0 } else { p }
            })
            .collect();

        let sum: f64 = probs.iter().sum();
        if sum > 0.0 {
            for p in &mut probs {
                *p /= sum;
            }
        }
        probs
    }

    /// Z basis (Computational) -> {|0>, |1>}.
    pub fn z_basis() -> Measurement {
        let v0: Array1<Complex64> = array![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
        let v1: Array1<Complex64> = array![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];

        Measurement {
            operators: vec![utils::outer_product(&v0, &v0), utils::outer_product(&v1, &v1)],
            values: vec![0, 1],
        }
    }

    /// X basis (Hadamard) -> {|+>, |->}.
    pub fn x_basis() -> Measurement {
        let inv_sqrt2 = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);

        let v_plus: Array1<Complex64> = array![inv_sqrt2, inv_sqrt2];
        let v_minus: Array1<Complex64> = array![inv_sqrt2, -inv_sqrt2];

        Measurement {
            operators: vec![
                utils::outer_product(&v_plus, &v_plus),
                utils::outer_product(&v_minus, &v_minus),
            ],
            values: vec![0, 1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementResult {
    /// Applied measurement operator index
    pub index: usize,
    /// Measured bit
    pub value: u8,
}
