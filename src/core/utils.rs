//! Utility functions for symbol-level linear algebra and bit handling.
//!
//! This module contains helper functions for:
//! - Matrix operations (outer product, expectation value).
//! - Completeness checks for projective measurements.
//! - Expansion of hash digests into bit sequences.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Computes the outer product of two vectors $|a\rangle\langle b|$.
pub fn outer_product(a: &Array1<Complex64>, b: &Array1<Complex64>) -> Array2<Complex64> {
    let n = a.len();
    let m = b.len();
    let mut res = Array2::zeros((n, m));

    for i in 0..n {
        for j in 0..m {
            res[[i, j]] = a[i] * b[j].conj();
        }
    }
    res
}

/// Computes $\langle\psi|M|\psi\rangle$ for a pure state vector.
pub fn expectation(op: &Array2<Complex64>, psi: &Array1<Complex64>) -> Complex64 {
    let m_psi = op.dot(psi);
    psi.iter().zip(m_psi.iter()).map(|(a, b)| a.conj() * b).sum()
}

/// Checks completeness relation for measurement operators.
///
/// Verifies if $\sum M_k^\dagger M_k = I$.
pub fn check_completeness(ops: &[Array2<Complex64>], dim: usize) -> bool {
    let eye = Array2::<Complex64>::eye(dim);
    let sum = ops
        .iter()
        .fold(Array2::<Complex64>::zeros((dim, dim)), |acc, op| {
            let dag = op.t().mapv(|c| c.conj());
            acc + dag.dot(op)
        });
    sum.iter()
        .zip(eye.iter())
        .all(|(a, b)| (a - b).norm() < 1e-9)
}

/// Expands bytes into bits, most significant bit first.
pub fn bytes_to_bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}

/// Renders a bit sequence as ASCII `'0'`/`'1'` characters.
pub fn bits_to_ascii(bits: &[u8]) -> Vec<u8> {
    bits.iter().map(|&b| b'0' + b).collect()
}
