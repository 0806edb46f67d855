//! BB84 quantum key distribution simulation.
//!
//! Symbols are encoded as two-level amplitude vectors, optionally intercepted
//! and resent by an eavesdropper, measured by the receiver, sifted, checked
//! against a QBER threshold and finally compressed by hash-based privacy
//! amplification. All randomness is drawn from a caller-supplied [`rand::Rng`].

mod config;
mod core;
pub mod protocols;
mod sampler;

pub use crate::config::ProtocolConfig;
pub use crate::core::{
    Basis, BitFlipChannel, Gate, Measurement, MeasurementResult, SymbolState, errors, state_label,
    utils,
};
pub use crate::protocols::qkd::{
    bb84::{Transmission, TransmissionParams, simulate_transmission},
    privacy::privacy_amplification,
    security::{SecurityStatus, SecurityVerdict, assess_security},
    timeline::{Timeline, TransmissionRecord, build_timeline},
};
pub use crate::sampler::{Counts, Sampler};
