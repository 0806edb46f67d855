use crate::core::errors::ConfigError;
use crate::protocols::qkd::privacy::DEFAULT_SECURITY_BITS;
use crate::protocols::qkd::security::DEFAULT_QBER_THRESHOLD;
use serde::Deserialize;

/// Parameters of a complete BB84 run.
///
/// Missing fields in a TOML document fall back to [`ProtocolConfig::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Symbols Alice transmits.
    pub num_qubits: usize,
    /// Highest QBER still accepted as secure.
    pub qber_threshold: f64,
    /// Probability Eve intercepts a symbol in the eavesdropped scenario.
    pub eve_intercept_prob: f64,
    /// Channel bit flip probability, applied to both scenarios.
    pub noise_prob: f64,
    /// `log2(1/ε)` for privacy amplification.
    pub target_security_bits: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            num_qubits: 1000,
            qber_threshold: DEFAULT_QBER_THRESHOLD,
            eve_intercept_prob: 0.5,
            noise_prob: 0.0,
            target_security_bits: DEFAULT_SECURITY_BITS,
        }
    }
}

impl ProtocolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_num_qubits(mut self, num_qubits: usize) -> Self {
        self.num_qubits = num_qubits;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.qber_threshold = threshold;
        self
    }

    pub fn with_eve_intercept_prob(mut self, p: f64) -> Self {
        self.eve_intercept_prob = p;
        self
    }

    pub fn with_noise(mut self, p: f64) -> Self {
        self.noise_prob = p;
        self
    }

    pub fn with_security_bits(mut self, bits: u32) -> Self {
        self.target_security_bits = bits;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_qubits == 0 {
            return Err(ConfigError::NoQubits);
        }
        for (name, value) in [
            ("qber_threshold", self.qber_threshold),
            ("eve_intercept_prob", self.eve_intercept_prob),
            ("noise_prob", self.noise_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        Ok(())
    }
}
