//! Chain-specific types and error definitions.

use std::fmt;

use thiserror::Error;

// Re-export NodeConfig from config module to avoid duplication
pub use crate::config::schema::NodeConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed, including errors reported by the node.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Endpoint URL could not be parsed.
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Local transaction signing failed.
    #[error("Signing error: {0}")]
    Signing(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Progress of the claim transaction through the write path.
///
/// ```text
/// Configured → NonceFetched → Built → Signed → (Submitted | Discarded)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStage {
    Configured,
    NonceFetched,
    Built,
    Signed,
    Submitted,
    Discarded,
}

impl ClaimStage {
    /// Stable lowercase label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStage::Configured => "configured",
            ClaimStage::NonceFetched => "nonce_fetched",
            ClaimStage::Built => "built",
            ClaimStage::Signed => "signed",
            ClaimStage::Submitted => "submitted",
            ClaimStage::Discarded => "discarded",
        }
    }
}

impl fmt::Display for ClaimStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
