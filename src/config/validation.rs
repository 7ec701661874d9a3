//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject shipped placeholders before any network call is made
//! - Validate value ranges (timeouts > 0, gas limit covers intrinsic cost)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClaimConfig → Result<(), Vec<ValidationError>>

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::{ClaimConfig, ENDPOINT_PLACEHOLDER};

/// Intrinsic gas cost of any transaction.
pub const MIN_GAS_LIMIT: u64 = 21_000;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("node.rpc_url still contains the <INFURA_KEY_HERE> placeholder")]
    EndpointPlaceholder,

    #[error("node.rpc_url is not a valid http(s) URL: {0}")]
    InvalidEndpoint(String),

    #[error("node.rpc_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("wallet private key is not set (use COLUMBUS_PRIVATE_KEY)")]
    PrivateKeyPlaceholder,

    #[error("wallet private key must be 32 bytes of hex")]
    MalformedPrivateKey,

    #[error("contract.address is not a valid address: {0}")]
    InvalidContractAddress(String),

    #[error("contract.claim_method must not be empty")]
    EmptyClaimMethod,

    #[error("gas.limit {0} is below the intrinsic cost of 21000")]
    GasLimitTooLow(u64),

    #[error("gas.price_gwei must be greater than zero")]
    ZeroGasPrice,
}

/// Validate everything the walkthrough needs before it touches the network.
pub fn validate_config(config: &ClaimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_endpoint(config);

    let key = &config.wallet.private_key;
    if key.is_placeholder() {
        errors.push(ValidationError::PrivateKeyPlaceholder);
    } else if !is_hex_key(key.expose()) {
        errors.push(ValidationError::MalformedPrivateKey);
    }

    errors.extend(validate_contract(config));

    if config.gas.limit < MIN_GAS_LIMIT {
        errors.push(ValidationError::GasLimitTooLow(config.gas.limit));
    }
    if config.gas.price_gwei == 0 {
        errors.push(ValidationError::ZeroGasPrice);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate only what read-only commands need (no key, no gas policy).
pub fn validate_contract(config: &ClaimConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if config.contract.address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidContractAddress(
            config.contract.address.clone(),
        ));
    }
    if config.contract.claim_method.trim().is_empty() {
        errors.push(ValidationError::EmptyClaimMethod);
    }
    errors
}

fn validate_endpoint(config: &ClaimConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let rpc_url = &config.node.rpc_url;

    if rpc_url.contains(ENDPOINT_PLACEHOLDER) {
        errors.push(ValidationError::EndpointPlaceholder);
    } else {
        match url::Url::parse(rpc_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                url.scheme()
            ))),
            Err(e) => errors.push(ValidationError::InvalidEndpoint(e.to_string())),
        }
    }

    if config.node.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    errors
}

fn is_hex_key(key: &str) -> bool {
    let key = key.trim();
    let hex = key.strip_prefix("0x").unwrap_or(key);
    hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PrivateKey;

    const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn valid_config() -> ClaimConfig {
        let mut config = ClaimConfig::default();
        config.node.rpc_url = "http://localhost:8545".to_string();
        config.wallet.private_key = PrivateKey::new(TEST_PRIVATE_KEY);
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_default_config_reports_both_placeholders() {
        let errors = validate_config(&ClaimConfig::default()).unwrap_err();
        assert!(errors.contains(&ValidationError::EndpointPlaceholder));
        assert!(errors.contains(&ValidationError::PrivateKeyPlaceholder));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.node.rpc_timeout_secs = 0;
        config.gas.limit = 20_000;
        config.gas.price_gwei = 0;
        config.contract.address = "0x1234".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::GasLimitTooLow(20_000)));
    }

    #[test]
    fn test_malformed_key() {
        let mut config = valid_config();
        config.wallet.private_key = PrivateKey::new("0x1234");
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MalformedPrivateKey]);
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = valid_config();
        config.node.rpc_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_lowercase_contract_address_accepted() {
        let config = valid_config();
        assert!(validate_contract(&config).is_empty());
    }
}
