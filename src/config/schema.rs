//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! walkthrough. All types derive Serde traits for deserialization from
//! config files; every section has defaults so an empty file is valid.

use std::fmt;

use alloy::primitives::utils::Unit;
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Placeholder shipped in the default endpoint URL.
pub const ENDPOINT_PLACEHOLDER: &str = "<INFURA_KEY_HERE>";

/// Placeholder shipped as the default private key.
pub const PRIVATE_KEY_PLACEHOLDER: &str = "<PRIVATE_KEY_HERE>";

/// Address of the deployed ColumbusToken contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x07c344edd719a356775e1fbd852c63dc46167b76";

/// Zero-argument method that mints the caller's one-time token allocation.
pub const DEFAULT_CLAIM_METHOD: &str = "getToken";

/// Root configuration for the walkthrough.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClaimConfig {
    /// Node endpoint settings.
    pub node: NodeConfig,

    /// Wallet key material.
    pub wallet: WalletConfig,

    /// Target contract and its interface descriptor.
    pub contract: ContractConfig,

    /// Gas policy for the claim transaction.
    pub gas: GasConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: format!("https://mainnet.infura.io/v3/{}", ENDPOINT_PLACEHOLDER),
            rpc_timeout_secs: 30,
        }
    }
}

/// Wallet configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// Hex-encoded secp256k1 private key. Never written back out.
    #[serde(skip_serializing)]
    pub private_key: PrivateKey,
}

/// A hex private key held in memory for the lifetime of the process.
///
/// `Debug` is redacted and the buffer is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Borrow the raw key text.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True while the key is still the shipped placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.0.trim().is_empty() || self.0.contains(PRIVATE_KEY_PLACEHOLDER)
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self(PRIVATE_KEY_PLACEHOLDER.to_string())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Target contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Deployed contract address (any case; checksummed for display).
    pub address: String,

    /// Path to a block-explorer ABI export. `None` uses the bundled copy.
    pub abi_path: Option<String>,

    /// Name of the zero-argument claim method.
    pub claim_method: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            abi_path: None,
            claim_method: DEFAULT_CLAIM_METHOD.to_string(),
        }
    }
}

/// Gas policy for the claim transaction.
///
/// Both values are fixed by the caller; neither is estimated from the node.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
    /// Gas limit (upper bound on units consumed).
    pub limit: u64,

    /// Gas price in gwei.
    pub price_gwei: u64,
}

impl GasConfig {
    /// Gas price converted to wei.
    pub fn price_wei(&self) -> u128 {
        (U256::from(self.price_gwei) * Unit::GWEI.wei()).saturating_to()
    }
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            limit: 70_000,
            price_gwei: 1,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
