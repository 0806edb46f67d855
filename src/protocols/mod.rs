//! Quantum Cryptography Protocols.
//!
//! This module contains the BB84 quantum key distribution protocol and its
//! classical post-processing.

pub mod qkd;
pub use qkd::{bb84, privacy, scenario, security, timeline};
