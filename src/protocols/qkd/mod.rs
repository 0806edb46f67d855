//! Quantum Key Distribution (QKD) Protocols.
//!
//! The BB84 pipeline, leaves first:
//! - **bb84**: quantum transmission with optional intercept-resend eavesdropping.
//! - **timeline**: per-index records, basis sifting and error flags.
//! - **security**: QBER threshold decision.
//! - **privacy**: entropy-bounded key distillation by hashing.
//! - **scenario**: end-to-end runs tying the stages together.

pub mod bb84;
pub mod privacy;
pub mod scenario;
pub mod security;
pub mod timeline;
