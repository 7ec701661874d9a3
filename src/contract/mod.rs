//! Contract interface subsystem.
//!
//! # Data Flow
//! ```text
//! abi/ColumbusTokenAbi.json | bundled literal
//!     → descriptor.rs (explorer envelope → ContractInterface)
//!     → token.rs (encode call, eth_call, decode output)
//! ```

pub mod bundled;
pub mod descriptor;
pub mod token;
pub mod types;

pub use descriptor::{ContractInterface, EntryKind, ExplorerEnvelope, InterfaceEntry, Mutability};
pub use token::TokenContract;
pub use types::{ContractError, ContractResult};
