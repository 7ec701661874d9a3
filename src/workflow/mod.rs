//! The walkthrough: identity, read path, then build-sign-(submit) path.
//!
//! # Data Flow
//! ```text
//! ClaimConfig
//!     → Wallet (address)
//!     → read path:  eth_getBalance, name, symbol, totalSupply, balanceOf
//!     → write path: nonce → build → sign → submit | discard
//!     → Report (stdout)
//! ```
//!
//! Every step runs in sequence and the first error ends the run.

pub mod report;

use std::io::Write;
use std::path::Path;

use alloy::consensus::TxLegacy;
use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

use crate::blockchain::{
    BlockchainClient, BlockchainError, ChainId, ClaimStage, SignedClaim, TxBuilder, Wallet,
};
use crate::config::validation::validate_contract;
use crate::config::{ensure_valid, ClaimConfig, ConfigError, ValidationError};
use crate::contract::{ContractError, ContractInterface, TokenContract};

pub use report::Report;

/// Any failure that ends the walkthrough.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Values observed on the read path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadSummary {
    pub wallet: Address,
    pub eth_balance: U256,
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
    pub token_balance: U256,
}

/// Result of the write path.
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    pub nonce: u64,
    pub chain_id: ChainId,
    pub tx: TxLegacy,
    pub signed: SignedClaim,
    /// Hash returned by the node, when the transaction was broadcast.
    pub submitted: Option<TxHash>,
    pub stage: ClaimStage,
}

/// Configured walkthrough, ready to run.
pub struct Walkthrough {
    config: ClaimConfig,
    client: BlockchainClient,
    wallet: Wallet,
    token: TokenContract,
}

impl Walkthrough {
    /// Validate the configuration and assemble every collaborator.
    ///
    /// No network request is made here.
    pub fn new(config: ClaimConfig) -> Result<Self, WorkflowError> {
        ensure_valid(&config)?;

        let client = BlockchainClient::new(config.node.clone())?;
        let wallet = Wallet::from_private_key(config.wallet.private_key.expose())?;

        let interface = ContractInterface::load(config.contract.abi_path.as_deref().map(Path::new))?;
        let address = parse_contract_address(&config)?;
        let token = TokenContract::new(client.clone(), address, interface);

        tracing::debug!(stage = %ClaimStage::Configured, contract = %token.checksummed_address(), "Walkthrough configured");

        Ok(Self {
            config,
            client,
            wallet,
            token,
        })
    }

    /// Address derived from the configured key.
    pub fn wallet_address(&self) -> Address {
        self.wallet.address()
    }

    /// The bound token contract.
    pub fn token(&self) -> &TokenContract {
        &self.token
    }

    /// Run the read path, then the write path.
    pub async fn run<W: Write>(
        &self,
        submit: bool,
        report: &mut Report<W>,
    ) -> Result<(ReadSummary, ClaimOutcome), WorkflowError> {
        let summary = self.read_path(report).await?;
        let outcome = self.write_path(submit, report).await?;
        Ok((summary, outcome))
    }

    /// Balance and contract queries. None of these change chain state.
    pub async fn read_path<W: Write>(
        &self,
        report: &mut Report<W>,
    ) -> Result<ReadSummary, WorkflowError> {
        let wallet = self.wallet.address();
        report.wallet_address(wallet)?;

        let eth_balance = self.client.get_balance(wallet).await?;
        report.eth_balance(eth_balance)?;

        report.contract_address(&self.token.checksummed_address())?;

        let name = self.token.name().await?;
        report.contract_name(&name)?;

        let symbol = self.token.symbol().await?;
        report.contract_symbol(&symbol)?;

        let total_supply = self.token.total_supply().await?;
        report.total_supply(total_supply)?;

        let token_balance = self.token.balance_of(wallet).await?;
        report.token_balance(&symbol, token_balance)?;

        tracing::info!(
            wallet = %wallet,
            %symbol,
            %token_balance,
            "Read path complete"
        );

        Ok(ReadSummary {
            wallet,
            eth_balance,
            name,
            symbol,
            total_supply,
            token_balance,
        })
    }

    /// Build and sign the claim transaction; broadcast it only if `submit`.
    pub async fn write_path<W: Write>(
        &self,
        submit: bool,
        report: &mut Report<W>,
    ) -> Result<ClaimOutcome, WorkflowError> {
        let builder = TxBuilder::new(
            self.client.clone(),
            self.wallet.clone(),
            self.config.gas.clone(),
        );

        let input = self.token.zero_arg_calldata(&self.config.contract.claim_method)?;

        let tx = builder.prepare(self.token.address(), input).await?;
        let nonce = tx.nonce;
        let chain_id = ChainId::from(tx.chain_id.unwrap_or_default());
        report.nonce(nonce)?;
        report.chain_id(chain_id)?;
        report.gas(builder.gas())?;
        report.raw_transaction(&tx)?;

        let signed = builder.sign(tx.clone())?;
        report.signed_transaction(&signed)?;

        let (submitted, stage) = if submit {
            let tx_hash = builder.submit(&signed).await?;
            report.submitted(tx_hash)?;
            (Some(tx_hash), ClaimStage::Submitted)
        } else {
            tracing::info!(stage = %ClaimStage::Discarded, tx_hash = %signed.hash(), "Signed transaction not submitted");
            report.discarded()?;
            (None, ClaimStage::Discarded)
        };

        Ok(ClaimOutcome {
            nonce,
            chain_id,
            tx,
            signed,
            submitted,
            stage,
        })
    }
}

fn parse_contract_address(config: &ClaimConfig) -> Result<Address, ConfigError> {
    config.contract.address.parse().map_err(|_| {
        ConfigError::Validation(vec![ValidationError::InvalidContractAddress(
            config.contract.address.clone(),
        )])
    })
}

/// Print the descriptor's entries in document order. Needs no key or node.
pub fn describe_interface<W: Write>(
    config: &ClaimConfig,
    report: &mut Report<W>,
) -> Result<ContractInterface, WorkflowError> {
    let errors = validate_contract(config);
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors).into());
    }

    let interface = ContractInterface::load(config.contract.abi_path.as_deref().map(Path::new))?;
    for (index, entry) in interface.entries().iter().enumerate() {
        report.interface_entry(index + 1, entry)?;
    }
    tracing::debug!(
        entries = interface.entries().len(),
        methods = interface.methods().count(),
        "Interface descriptor listed"
    );
    Ok(interface)
}

/// Print the address derived from the configured key. Needs no node.
pub fn derive_address<W: Write>(
    config: &ClaimConfig,
    report: &mut Report<W>,
) -> Result<Address, WorkflowError> {
    if config.wallet.private_key.is_placeholder() {
        return Err(ConfigError::Validation(vec![ValidationError::PrivateKeyPlaceholder]).into());
    }

    let wallet = Wallet::from_private_key(config.wallet.private_key.expose())?;
    report.wallet_address(wallet.address())?;
    Ok(wallet.address())
}

impl std::fmt::Debug for Walkthrough {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walkthrough")
            .field("wallet", &self.wallet.address())
            .field("contract", &self.token.address())
            .finish()
    }
}
