//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! columbus.toml (optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks, placeholder detection)
//!     → ClaimConfig (validated, immutable)
//!     → passed by value into the walkthrough
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Secrets come from the environment first and are never serialized

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ensure_valid, resolve_config, ConfigError};
pub use schema::{
    ClaimConfig, ContractConfig, GasConfig, NodeConfig, ObservabilityConfig, PrivateKey,
    WalletConfig,
};
pub use validation::ValidationError;
