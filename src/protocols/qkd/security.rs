use serde::Serialize;
use std::fmt;
use tracing::info;

/// QBER above which intercept-resend eavesdropping is assumed.
pub const DEFAULT_QBER_THRESHOLD: f64 = 0.11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityStatus {
    Secure,
    Insecure,
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityStatus::Secure => write!(f, "SECURE"),
            SecurityStatus::Insecure => write!(f, "INSECURE"),
        }
    }
}

/// What the caller should do with the sifted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    ProceedWithKey,
    AbortAndRetry,
}

/// Outcome of comparing a measured QBER against the acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecurityVerdict {
    pub status: SecurityStatus,
    pub qber: f64,
    pub threshold: f64,
}

impl SecurityVerdict {
    pub fn is_secure(&self) -> bool {
        self.status == SecurityStatus::Secure
    }

    pub fn action(&self) -> Action {
        match self.status {
            SecurityStatus::Secure => Action::ProceedWithKey,
            SecurityStatus::Insecure => Action::AbortAndRetry,
        }
    }

    /// Human readable summary of the decision.
    pub fn message(&self) -> String {
        match self.status {
            SecurityStatus::Secure => format!(
                "QBER ({:.3}) below threshold. Key exchange successful.",
                self.qber
            ),
            SecurityStatus::Insecure => format!(
                "QBER ({:.3}) exceeds threshold ({}). Eavesdropping suspected.",
                self.qber, self.threshold
            ),
        }
    }
}

/// Accepts the channel when `qber <= threshold`.
pub fn assess_security(qber: f64, threshold: f64) -> SecurityVerdict {
    let status = if qber <= threshold {
        SecurityStatus::Secure
    } else {
        SecurityStatus::Insecure
    };

    info!(qber, threshold, %status, "security assessed");

    SecurityVerdict {
        status,
        qber,
        threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_secure() {
        let v = assess_security(0.10, 0.11);
        assert_eq!(v.status, SecurityStatus::Secure);
        assert_eq!(v.action(), Action::ProceedWithKey);
    }

    #[test]
    fn above_threshold_is_insecure() {
        let v = assess_security(0.12, 0.11);
        assert_eq!(v.status, SecurityStatus::Insecure);
        assert_eq!(v.action(), Action::AbortAndRetry);
    }

    #[test]
    fn boundary_is_inclusive() {
        assert!(assess_security(0.11, 0.11).is_secure());
    }

    #[test]
    fn verdict_carries_inputs() {
        let v = assess_security(0.25, DEFAULT_QBER_THRESHOLD);
        assert_eq!(v.qber, 0.25);
        assert_eq!(v.threshold, 0.11);
    }

    #[test]
    fn messages() {
        assert_eq!(
            assess_security(0.0123, 0.11).message(),
            "QBER (0.012) below threshold. Key exchange successful."
        );
        assert_eq!(
            assess_security(0.25, 0.11).message(),
            "QBER (0.250) exceeds threshold (0.11). Eavesdropping suspected."
        );
        assert_eq!(SecurityStatus::Insecure.to_string(), "INSECURE");
    }
}
