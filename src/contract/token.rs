//! Typed access to the token contract through its interface descriptor.
//!
//! # Responsibilities
//! - Encode calls from the descriptor's declared inputs
//! - Run read-only calls against the latest block and decode the outputs
//! - Produce calldata for the zero-argument claim method

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::BlockchainClient;
use crate::contract::descriptor::ContractInterface;
use crate::contract::types::{ContractError, ContractResult};

/// One deployed token contract.
#[derive(Debug, Clone)]
pub struct TokenContract {
    client: BlockchainClient,
    address: Address,
    interface: ContractInterface,
}

impl TokenContract {
    pub fn new(client: BlockchainClient, address: Address, interface: ContractInterface) -> Self {
        Self {
            client,
            address,
            interface,
        }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// EIP-55 checksummed form of the contract address.
    pub fn checksummed_address(&self) -> String {
        self.address.to_checksum(None)
    }

    /// ABI-encode a call to `method` with `args`.
    pub fn calldata(&self, method: &str, args: &[DynSolValue]) -> ContractResult<Bytes> {
        let function = self.interface.function(method)?;
        function
            .abi_encode_input(args)
            .map(Bytes::from)
            .map_err(|e| ContractError::Encode {
                method: method.to_string(),
                reason: e.to_string(),
            })
    }

    /// Execute a read-only call and decode its outputs.
    pub async fn call(&self, method: &str, args: &[DynSolValue]) -> ContractResult<Vec<DynSolValue>> {
        let input = self.calldata(method, args)?;
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(input);

        let output = self.client.call(tx).await?;
        tracing::debug!(method, bytes = output.len(), "Contract call returned");

        if output.is_empty() {
            return Err(ContractError::Decode {
                method: method.to_string(),
                reason: "empty return data (call reverted or no contract at address)".to_string(),
            });
        }

        let function = self.interface.function(method)?;
        function
            .abi_decode_output(&output)
            .map_err(|e| ContractError::Decode {
                method: method.to_string(),
                reason: e.to_string(),
            })
    }

    /// Token name.
    pub async fn name(&self) -> ContractResult<String> {
        self.call_string("name").await
    }

    /// Token symbol.
    pub async fn symbol(&self) -> ContractResult<String> {
        self.call_string("symbol").await
    }

    /// Total token supply in base units.
    pub async fn total_supply(&self) -> ContractResult<U256> {
        self.call_uint("totalSupply", &[]).await
    }

    /// Token balance of `owner` in base units.
    pub async fn balance_of(&self, owner: Address) -> ContractResult<U256> {
        self.call_uint("balanceOf", &[DynSolValue::Address(owner)])
            .await
    }

    /// Calldata for a method that takes no arguments, such as the claim.
    pub fn zero_arg_calldata(&self, method: &str) -> ContractResult<Bytes> {
        self.calldata(method, &[])
    }

    async fn call_string(&self, method: &str) -> ContractResult<String> {
        let values = self.call(method, &[]).await?;
        values
            .first()
            .and_then(DynSolValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| ContractError::UnexpectedOutput {
                method: method.to_string(),
                expected: "string",
            })
    }

    async fn call_uint(&self, method: &str, args: &[DynSolValue]) -> ContractResult<U256> {
        let values = self.call(method, args).await?;
        values
            .first()
            .and_then(DynSolValue::as_uint)
            .map(|(value, _bits)| value)
            .ok_or_else(|| ContractError::UnexpectedOutput {
                method: method.to_string(),
                expected: "uint",
            })
    }
}
