//! End-to-end BB84 runs: sifting, security decision and key distillation for
//! a clean baseline channel and an eavesdropped one.

use crate::ProtocolConfig;
use crate::core::errors::{InputError, ProtocolError};
use crate::protocols::qkd::bb84::{
    Transmission, TransmissionParams, random_bases, random_bits, simulate_transmission,
};
use crate::protocols::qkd::privacy::privacy_amplification;
use crate::protocols::qkd::security::{SecurityVerdict, assess_security};
use crate::protocols::qkd::timeline::{Timeline, build_timeline};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Post-processing results for one transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub timeline: Timeline,
    pub errors: usize,
    pub qber: f64,
    pub verdict: SecurityVerdict,
    pub sifted_key: Vec<u8>,
    /// Empty unless the verdict is secure and enough material survives.
    pub final_key: Vec<u8>,
}

impl ScenarioReport {
    pub fn num_bits(&self) -> usize {
        self.timeline.len()
    }

    pub fn sifted_count(&self) -> usize {
        self.sifted_key.len()
    }

    /// Share of transmitted symbols that survived sifting.
    pub fn efficiency(&self) -> f64 {
        ratio(self.sifted_count(), self.num_bits())
    }

    /// Final key bits per transmitted symbol.
    pub fn key_rate(&self) -> f64 {
        ratio(self.final_key.len(), self.num_bits())
    }

    pub fn error_positions(&self) -> Vec<usize> {
        self.timeline.error_positions()
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Sifts Bob's results, assesses the channel and, if it is secure, distills
/// the final key.
pub fn evaluate_scenario(
    alice_bits: &[u8],
    alice_bases: &[u8],
    bob_bases: &[u8],
    bob_results: &[u8],
    threshold: f64,
    target_security_bits: u32,
) -> Result<ScenarioReport, InputError> {
    let timeline = build_timeline(alice_bits, alice_bases, bob_bases, bob_results)?;
    let errors = timeline.error_count();
    let qber = timeline.qber();
    let verdict = assess_security(qber, threshold);
    let sifted_key = timeline.sifted_key();

    let final_key = if verdict.is_secure() {
        privacy_amplification(&sifted_key, qber, target_security_bits)?
    } else {
        warn!(qber, threshold, "channel rejected, discarding sifted key");
        Vec::new()
    };

    Ok(ScenarioReport {
        timeline,
        errors,
        qber,
        verdict,
        sifted_key,
        final_key,
    })
}

/// A transmission together with its post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub transmission: Transmission,
    pub report: ScenarioReport,
}

/// Baseline and eavesdropped runs over the same Alice/Bob choices.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolRun {
    pub alice_bits: Vec<u8>,
    pub alice_bases: Vec<u8>,
    pub bob_bases: Vec<u8>,
    /// No eavesdropper, channel noise only.
    pub baseline: ScenarioOutcome,
    /// Eve intercepting with the configured probability, same noise.
    pub eavesdropped: ScenarioOutcome,
}

/// Runs BB84 twice on identical inputs: once on a clean channel and once with Eve.
///
/// Each scenario draws from its own generator seeded from `rng`, so the two
/// runs share no mutable state.
pub fn run_protocol<R: Rng + ?Sized>(
    config: &ProtocolConfig,
    rng: &mut R,
) -> Result<ProtocolRun, ProtocolError> {
    config.validate()?;
    let n = config.num_qubits;

    let alice_bits = random_bits(n, rng);
    let alice_bases = random_bases(n, rng);
    let bob_bases = random_bases(n, rng);

    let mut baseline_rng = StdRng::seed_from_u64(rng.random());
    let mut eve_rng = StdRng::seed_from_u64(rng.random());

    let run = |params: TransmissionParams,
               rng: &mut StdRng|
     -> Result<ScenarioOutcome, InputError> {
        let transmission =
            simulate_transmission(&alice_bits, &alice_bases, &bob_bases, &params, rng)?;
        let report = evaluate_scenario(
            &alice_bits,
            &alice_bases,
            &bob_bases,
            &transmission.bob_results,
            config.qber_threshold,
            config.target_security_bits,
        )?;
        Ok(ScenarioOutcome {
            transmission,
            report,
        })
    };

    let clean = TransmissionParams::new().with_noise(config.noise_prob);
    let baseline = run(clean, &mut baseline_rng)?;
    let eavesdropped = run(clean.with_eve(config.eve_intercept_prob), &mut eve_rng)?;

    debug!(
        num_qubits = n,
        baseline_qber = baseline.report.qber,
        eavesdropped_qber = eavesdropped.report.qber,
        baseline_key = baseline.report.final_key.len(),
        eavesdropped_key = eavesdropped.report.final_key.len(),
        "protocol run complete"
    );

    Ok(ProtocolRun {
        alice_bits,
        alice_bases,
        bob_bases,
        baseline,
        eavesdropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::qkd::security::SecurityStatus;

    #[test]
    fn insecure_scenario_has_no_final_key() {
        // Every matched symbol in error
        let report = evaluate_scenario(
            &[0, 1, 0, 1],
            &[0, 0, 1, 1],
            &[0, 0, 1, 1],
            &[1, 0, 1, 0],
            0.11,
            0,
        )
        .unwrap();
        assert_eq!(report.qber, 1.0);
        assert_eq!(report.verdict.status, SecurityStatus::Insecure);
        assert!(report.final_key.is_empty());
        assert_eq!(report.sifted_key, vec![0, 1, 0, 1]);
        assert_eq!(report.error_positions(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn secure_scenario_distills_key() {
        let bits = vec![1u8, 0, 1, 1, 0, 0, 1, 0];
        let bases = vec![0u8, 1, 0, 1, 0, 1, 0, 1];
        let report = evaluate_scenario(&bits, &bases, &bases, &bits, 0.11, 0).unwrap();

        assert!(report.verdict.is_secure());
        assert_eq!(report.errors, 0);
        assert_eq!(report.final_key.len(), 8);
        assert_eq!(report.efficiency(), 1.0);
        assert_eq!(report.key_rate(), 1.0);
    }

    #[test]
    fn nothing_sifted_is_secure_but_keyless() {
        let report = evaluate_scenario(&[0, 1], &[0, 0], &[1, 1], &[1, 1], 0.11, 128).unwrap();
        assert_eq!(report.qber, 0.0);
        assert!(report.verdict.is_secure());
        assert!(report.final_key.is_empty());
        assert_eq!(report.efficiency(), 0.0);
    }

    #[test]
    fn run_rejects_invalid_config() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = ProtocolConfig::new().with_noise(2.0);
        assert!(matches!(
            run_protocol(&config, &mut rng),
            Err(ProtocolError::Config(_))
        ));
    }
}
