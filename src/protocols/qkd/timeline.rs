//! Per-index transmission records and sifting.

use crate::core::errors::InputError;
use crate::protocols::qkd::bb84::{decode_bases, validate_bits};
use serde::Serialize;

/// One transmitted symbol as seen after basis reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransmissionRecord {
    pub bit_index: usize,
    pub alice_bit: u8,
    pub alice_basis: u8,
    pub bob_basis: u8,
    pub bob_result: u8,
    /// Alice and Bob chose the same basis; the symbol survives sifting.
    pub used: bool,
    /// A sifted symbol whose value disagrees between Alice and Bob.
    pub error: bool,
}

/// Index-ordered records of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    records: Vec<TransmissionRecord>,
}

impl Timeline {
    pub fn records(&self) -> &[TransmissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records that survived sifting, in index order.
    pub fn sifted(&self) -> impl Iterator<Item = &TransmissionRecord> {
        self.records.iter().filter(|r| r.used)
    }

    pub fn sifted_count(&self) -> usize {
        self.sifted().count()
    }

    /// Alice's bits at matched-basis indices.
    pub fn sifted_key(&self) -> Vec<u8> {
        self.sifted().map(|r| r.alice_bit).collect()
    }

    /// Bob's bits at matched-basis indices.
    pub fn bob_sifted_key(&self) -> Vec<u8> {
        self.sifted().map(|r| r.bob_result).collect()
    }

    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.error).count()
    }

    /// `BitIndex` of every erroneous record.
    pub fn error_positions(&self) -> Vec<usize> {
        self.records
            .iter()
            .filter(|r| r.error)
            .map(|r| r.bit_index)
            .collect()
    }

    /// Fraction of sifted symbols in error.
    ///
    /// Defined as `0.0` when nothing was sifted.
    pub fn qber(&self) -> f64 {
        let sifted = self.sifted_count();
        if sifted == 0 {
            0.0
        } else {
            self.error_count() as f64 / sifted as f64
        }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TransmissionRecord;
    type IntoIter = std::slice::Iter<'a, TransmissionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Tabulates one record per index.
///
/// # Errors
///
/// Returns an `InputError` if the sequences are empty, differ in length, or
/// hold values other than 0/1.
pub fn build_timeline(
    alice_bits: &[u8],
    alice_bases: &[u8],
    bob_bases: &[u8],
    bob_results: &[u8],
) -> Result<Timeline, InputError> {
    let n = alice_bits.len();
    if n == 0 {
        return Err(InputError::Empty);
    }
    validate_bits("alice_bits", alice_bits, n)?;
    decode_bases("alice_bases", alice_bases, n)?;
    decode_bases("bob_bases", bob_bases, n)?;
    validate_bits("bob_results", bob_results, n)?;

    let records = (0..n)
        .map(|i| {
            let used = alice_bases[i] == bob_bases[i];
            TransmissionRecord {
                bit_index: i,
                alice_bit: alice_bits[i],
                alice_basis: alice_bases[i],
                bob_basis: bob_bases[i],
                bob_result: bob_results[i],
                used,
                error: used && alice_bits[i] != bob_results[i],
            }
        })
        .collect();

    Ok(Timeline { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_matches_and_errors() {
        let timeline =
            build_timeline(&[0, 1, 1, 0], &[0, 1, 0, 1], &[0, 1, 1, 1], &[0, 0, 1, 0]).unwrap();
        let flags: Vec<(bool, bool)> =
            timeline.records().iter().map(|r| (r.used, r.error)).collect();
        assert_eq!(
            flags,
            vec![(true, false), (true, true), (false, false), (true, false)]
        );
        assert_eq!(timeline.sifted_key(), vec![0, 1, 0]);
        assert_eq!(timeline.bob_sifted_key(), vec![0, 0, 0]);
        assert_eq!(timeline.error_positions(), vec![1]);
        assert!((timeline.qber() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_basis_never_counts_as_error() {
        let timeline = build_timeline(&[1], &[0], &[1], &[0]).unwrap();
        let record = timeline.records()[0];
        assert!(!record.used);
        assert!(!record.error);
    }

    #[test]
    fn empty_sift_has_zero_qber() {
        let timeline = build_timeline(&[0, 1], &[0, 0], &[1, 1], &[1, 0]).unwrap();
        assert_eq!(timeline.sifted_count(), 0);
        assert_eq!(timeline.qber(), 0.0);
    }

    #[test]
    fn preserves_index_order() {
        let timeline = build_timeline(&[1, 0, 1], &[1, 1, 1], &[1, 1, 1], &[1, 0, 1]).unwrap();
        let mut idx = Vec::new();
        for record in &timeline {
            idx.push(record.bit_index);
        }
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = build_timeline(&[0, 1], &[0, 1], &[0, 1], &[0]).unwrap_err();
        assert_eq!(
            err,
            InputError::LengthMismatch {
                field: "bob_results",
                expected: 2,
                got: 1
            }
        );
    }
}
