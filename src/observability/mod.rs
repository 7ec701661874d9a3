//! Observability subsystem.
//!
//! All subsystems emit `tracing` events with structured fields (address,
//! chain_id, nonce, tx_hash, stage). Private keys are never recorded.

pub mod logging;
