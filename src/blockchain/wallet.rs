//! Wallet identity and transaction signing.
//!
//! # Security
//! - Keys are never logged or serialized
//! - The signing key is zeroized on drop by `k256`

use alloy::consensus::{SignableTransaction, Signed, TxLegacy};
use alloy::network::TxSignerSync;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Address plus signing capability derived from a private key.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a legacy transaction locally.
    ///
    /// The transaction's own `chain_id` is used for EIP-155 replay
    /// protection. Signatures are deterministic (RFC 6979), so signing the
    /// same transaction twice yields identical output.
    pub fn sign_transaction(&self, mut tx: TxLegacy) -> BlockchainResult<Signed<TxLegacy>> {
        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| BlockchainError::Signing(e.to_string()))?;
        Ok(tx.into_signed(signature))
    }
}
