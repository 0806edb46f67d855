use crate::core::errors::GateError;
use ndarray::{Array2, arr2};
use num_complex::Complex64;

/// Represents a single-symbol quantum gate.
///
/// A gate is defined by its 2x2 unitary matrix acting on one two-level system.
#[derive(Clone, Debug)]
pub struct Gate {
    /// The unitary matrix of the gate.
    pub matrix: Array2<Complex64>,
}

impl Gate {
    /// Creates a new `Gate` from a unitary matrix.
    ///
    /// # Arguments
    ///
    /// * `matrix` - A square, unitary 2x2 `Array2<Complex64>`.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - The matrix is not square.
    /// - The matrix is not 2x2.
    /// - The matrix is not unitary.
    pub fn new(matrix: Array2<Complex64>) -> Result<Self, GateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(GateError::NotSquareMatrix);
        }

        if rows != 2 {
            return Err(GateError::InvalidDimensions);
        }

        if !Self::check_unitary(&matrix) {
            return Err(GateError::NonUnitary);
        }

        Ok(Self { matrix })
    }

    /// Checks if a given matrix is unitary
    fn check_unitary(matrix: &Array2<Complex64>) -> bool {
        let (rows, _) = matrix.dim();
        let eye = Array2::<Complex64>::eye(rows);

        let u_dagger = matrix.t().mapv(|x| x.conj());
        let product = matrix.dot(&u_dagger);

        product
            .iter()
            .zip(eye.iter())
            .all(|(a, b)| (*a - *b).norm() < 1e-6)
    }

    // --- Standard Gates ---
    //
    // Built directly: the matrices are unitary by construction.

    /// Creates an Identity gate.
    pub fn i() -> Gate {
        Gate {
            matrix: arr2(&[
                [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            ]),
        }
    }

    /// Creates a Pauli-X gate (bit flip).
    pub fn x() -> Gate {
        Gate {
            matrix: arr2(&[
                [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
                [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            ]),
        }
    }

    /// Creates a Hadamard gate, rotating the rectilinear basis onto the diagonal one.
    pub fn h() -> Gate {
        let factor = 1.0 / 2.0_f64.sqrt();
        Gate {
            matrix: arr2(&[
                [Complex64::new(factor, 0.0), Complex64::new(factor, 0.0)],
                [Complex64::new(factor, 0.0), Complex64::new(-factor, 0.0)],
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_gates_are_unitary() {
        for gate in [Gate::i(), Gate::x(), Gate::h()] {
            assert!(Gate::new(gate.matrix).is_ok());
        }
    }

    #[test]
    fn rejects_non_unitary() {
        let m = arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ]);
        assert_eq!(Gate::new(m).unwrap_err(), GateError::NonUnitary);
    }

    #[test]
    fn rejects_wrong_dimensions() {
        let m = Array2::<Complex64>::eye(4);
        assert_eq!(Gate::new(m).unwrap_err(), GateError::InvalidDimensions);

        let m = Array2::<Complex64>::zeros((2, 3));
        assert_eq!(Gate::new(m).unwrap_err(), GateError::NotSquareMatrix);
    }
}
