use num_complex::Complex64;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Matrix is not Unitary (U†U != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Invalid Dimensions: symbol gates act on a single two-level system")]
    InvalidDimensions,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasurementError {
    #[error("Number of operators ({ops}) does not match number of values ({vals})")]
    CountMismatch { ops: usize, vals: usize },

    #[error("Measurement operators do not sum to Identity (Completeness relation failed)")]
    NotComplete,

    #[error("Invalid operator dimensions")]
    InvalidDimensions,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Vector is not normalized. Norm squared: {0}")]
    NotNormalized(f64),

    #[error("Invalid dimensions: expected 2 amplitudes, got {0}")]
    InvalidDimensions(usize),

    #[error("Amplitude is not finite: {0}")]
    NonFinite(Complex64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),
}

/// Rejected caller input at the simulation boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Input sequences must not be empty")]
    Empty,

    #[error("Length mismatch for `{field}`: expected {expected}, got {got}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Invalid bit {value} in `{field}` at index {index}: must be 0 or 1")]
    InvalidBit {
        field: &'static str,
        index: usize,
        value: u8,
    },

    #[error("Invalid basis {value} in `{field}` at index {index}: must be 0 or 1")]
    InvalidBasis {
        field: &'static str,
        index: usize,
        value: u8,
    },

    #[error("Invalid probability for `{name}`: {value}. Must be between 0.0 and 1.0")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Channel error: {0}")]
    ChannelError(#[from] ChannelError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`num_qubits` must be greater than zero")]
    NoQubits,

    #[error("Invalid value for `{name}`: {value}. Must be between 0.0 and 1.0")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Failure of a full protocol run.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}
