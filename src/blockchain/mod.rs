//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ClaimConfig (private key, RPC URL, gas policy)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (nonce, build, sign, broadcast)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - No retries: the first failure is returned to the caller

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::{SignedClaim, TxBuilder};
pub use types::{BlockchainError, BlockchainResult, ChainId, ClaimStage};
pub use wallet::Wallet;
