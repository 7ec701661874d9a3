//! Contract-layer error definitions.

use thiserror::Error;

use crate::blockchain::BlockchainError;

/// Errors raised while loading a descriptor or calling the contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Descriptor file could not be read.
    #[error("Failed to read descriptor {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Outer explorer envelope is not valid JSON.
    #[error("Malformed descriptor envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// Inner ABI is malformed or unusable.
    #[error("Invalid interface descriptor: {0}")]
    Descriptor(String),

    /// Method is not declared by the descriptor.
    #[error("Method '{0}' not found in interface descriptor")]
    UnknownMethod(String),

    /// Arguments do not match the declared inputs.
    #[error("Failed to encode call to '{method}': {reason}")]
    Encode { method: String, reason: String },

    /// Return data does not match the declared outputs.
    #[error("Failed to decode output of '{method}': {reason}")]
    Decode { method: String, reason: String },

    /// Decoded value has a different type than the caller expects.
    #[error("Unexpected output from '{method}': expected {expected}")]
    UnexpectedOutput {
        method: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
