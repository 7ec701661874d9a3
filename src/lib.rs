//! Read from and claim tokens on the ColumbusToken contract.

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod observability;
pub mod workflow;

pub use config::schema::ClaimConfig;
pub use workflow::{Report, Walkthrough, WorkflowError};
