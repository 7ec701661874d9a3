//! Transaction building, signing and broadcasting.
//!
//! # Responsibilities
//! - Snapshot the sender's nonce and the endpoint's chain id
//! - Build a legacy transaction with the configured gas policy
//! - Sign locally and encode the raw payload
//! - Broadcast once, without waiting for confirmation

use alloy::consensus::{Signed, TxEnvelope, TxLegacy};
use alloy::eips::Encodable2718;
use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainResult, ChainId, ClaimStage};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::GasConfig;

/// A locally signed transaction and its raw network encoding.
#[derive(Debug, Clone)]
pub struct SignedClaim {
    tx: Signed<TxLegacy>,
    raw: Bytes,
}

impl SignedClaim {
    fn new(tx: Signed<TxLegacy>) -> Self {
        let raw = TxEnvelope::from(tx.clone()).encoded_2718().into();
        Self { tx, raw }
    }

    /// The signed transaction, including its signature components.
    pub fn signed(&self) -> &Signed<TxLegacy> {
        &self.tx
    }

    /// The transaction hash derived from the signed payload.
    pub fn hash(&self) -> TxHash {
        *self.tx.hash()
    }

    /// EIP-2718 encoded bytes, as passed to `eth_sendRawTransaction`.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

/// Builds, signs and submits transactions from one wallet.
pub struct TxBuilder {
    client: BlockchainClient,
    wallet: Wallet,
    gas: GasConfig,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: BlockchainClient, wallet: Wallet, gas: GasConfig) -> Self {
        Self {
            client,
            wallet,
            gas,
        }
    }

    /// Read the sender's outgoing transaction count.
    ///
    /// The value is a one-time snapshot and is not re-checked before signing.
    pub async fn fetch_nonce(&self) -> BlockchainResult<u64> {
        let nonce = self.client.get_transaction_count(self.wallet.address()).await?;
        tracing::debug!(stage = %ClaimStage::NonceFetched, nonce, "Nonce fetched");
        Ok(nonce)
    }

    /// Assemble an unsigned call to `to` carrying `input`.
    ///
    /// Pure: the same arguments always produce the same transaction.
    pub fn build(&self, to: Address, input: Bytes, nonce: u64, chain_id: ChainId) -> TxLegacy {
        TxLegacy {
            chain_id: Some(chain_id.0),
            nonce,
            gas_price: self.gas.price_wei(),
            gas_limit: self.gas.limit,
            to: TxKind::Call(to),
            value: U256::ZERO,
            input,
        }
    }

    /// Fetch a fresh nonce and the chain id, then build the transaction.
    pub async fn prepare(&self, to: Address, input: Bytes) -> BlockchainResult<TxLegacy> {
        let nonce = self.fetch_nonce().await?;
        let chain_id = self.client.get_chain_id().await?;
        let tx = self.build(to, input, nonce, chain_id);

        tracing::debug!(
            stage = %ClaimStage::Built,
            nonce,
            chain_id = %chain_id,
            gas_limit = tx.gas_limit,
            gas_price = tx.gas_price,
            "Transaction built"
        );
        Ok(tx)
    }

    /// Sign the transaction with the wallet's key.
    pub fn sign(&self, tx: TxLegacy) -> BlockchainResult<SignedClaim> {
        let signed = SignedClaim::new(self.wallet.sign_transaction(tx)?);
        tracing::debug!(stage = %ClaimStage::Signed, tx_hash = %signed.hash(), "Transaction signed");
        Ok(signed)
    }

    /// Broadcast a signed transaction. Irreversible once accepted.
    pub async fn submit(&self, signed: &SignedClaim) -> BlockchainResult<TxHash> {
        let tx_hash = self.client.send_raw_transaction(signed.raw()).await?;
        tracing::info!(stage = %ClaimStage::Submitted, tx_hash = %tx_hash, "Transaction submitted");
        Ok(tx_hash)
    }

    /// Get the gas policy.
    pub fn gas(&self) -> &GasConfig {
        &self.gas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NodeConfig;
    use alloy::primitives::address;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn builder() -> TxBuilder {
        let client = BlockchainClient::new(NodeConfig {
            rpc_url: "http://127.0.0.1:9".to_string(),
            rpc_timeout_secs: 1,
        })
        .unwrap();
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        TxBuilder::new(client, wallet, GasConfig::default())
    }

    #[test]
    fn test_build_uses_gas_policy() {
        let builder = builder();
        let to = address!("07c344edd719a356775e1fbd852c63dc46167b76");
        let tx = builder.build(to, Bytes::new(), 3, ChainId(1));

        assert_eq!(tx.nonce, 3);
        assert_eq!(tx.chain_id, Some(1));
        assert_eq!(tx.gas_limit, 70_000);
        assert_eq!(tx.gas_price, 1_000_000_000);
        assert_eq!(tx.to, TxKind::Call(to));
        assert_eq!(tx.value, U256::ZERO);
    }

    #[test]
    fn test_signed_claim_encoding_is_stable() {
        let builder = builder();
        let to = address!("07c344edd719a356775e1fbd852c63dc46167b76");
        let input = Bytes::from_static(&[0x21, 0xdf, 0x0d, 0xa7]);

        let a = builder.sign(builder.build(to, input.clone(), 0, ChainId(1))).unwrap();
        let b = builder.sign(builder.build(to, input, 0, ChainId(1))).unwrap();

        assert_eq!(a.raw(), b.raw());
        assert_eq!(a.hash(), b.hash());
        // Legacy transactions are plain RLP lists
        assert!(a.raw()[0] >= 0xc0);
    }

    #[test]
    fn test_chain_id_changes_signature() {
        let builder = builder();
        let to = Address::ZERO;

        let mainnet = builder.sign(builder.build(to, Bytes::new(), 0, ChainId(1))).unwrap();
        let sepolia = builder
            .sign(builder.build(to, Bytes::new(), 0, ChainId(11_155_111)))
            .unwrap();
        assert_ne!(mainnet.hash(), sepolia.hash());
    }
}
