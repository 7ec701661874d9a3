//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{ClaimConfig, PrivateKey};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `node.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "COLUMBUS_RPC_URL";

/// Environment variable overriding `wallet.private_key`.
pub const PRIVATE_KEY_ENV_VAR: &str = "COLUMBUS_PRIVATE_KEY";

/// Config file read when no path is given and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "columbus.toml";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClaimConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, `columbus.toml` is read when
/// present and defaults are used otherwise. Environment variables are
/// applied last.
pub fn resolve_config(path: Option<&Path>) -> Result<ClaimConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_config(Path::new(DEFAULT_CONFIG_PATH))?
        }
        None => ClaimConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Overlay secrets and endpoint from the environment.
pub fn apply_env_overrides<F>(config: &mut ClaimConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(RPC_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        tracing::info!(var = RPC_URL_ENV_VAR, "Endpoint taken from environment");
        config.node.rpc_url = url;
    }
    if let Some(key) = lookup(PRIVATE_KEY_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        tracing::info!(var = PRIVATE_KEY_ENV_VAR, "Private key taken from environment");
        config.wallet.private_key = PrivateKey::new(key);
    }
}

/// Run full validation, converting failures into a `ConfigError`.
pub fn ensure_valid(config: &ClaimConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}
