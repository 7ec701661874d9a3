//! Line-oriented, human-readable walkthrough output.

use std::io::{self, Write};

use alloy::consensus::transaction::to_eip155_value;
use alloy::consensus::TxLegacy;
use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, TxHash, TxKind, U256};

use crate::blockchain::{ChainId, SignedClaim};
use crate::config::GasConfig;
use crate::contract::InterfaceEntry;

/// Writes the walkthrough report to any sink (stdout in the binary).
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the report and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn wallet_address(&mut self, address: Address) -> io::Result<()> {
        writeln!(self.out, "Wallet address: {}", address.to_checksum(None))
    }

    pub fn eth_balance(&mut self, wei: U256) -> io::Result<()> {
        writeln!(self.out, "ETH balance: {}", format_ether(wei))
    }

    pub fn contract_address(&mut self, checksummed: &str) -> io::Result<()> {
        writeln!(self.out, "Contract address: {}", checksummed)
    }

    pub fn contract_name(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "Contract Name: {}", name)
    }

    pub fn contract_symbol(&mut self, symbol: &str) -> io::Result<()> {
        writeln!(self.out, "Contract Symbol: {}", symbol)
    }

    pub fn total_supply(&mut self, supply: U256) -> io::Result<()> {
        writeln!(self.out, "Contract totalSupply: {}", supply)
    }

    pub fn token_balance(&mut self, symbol: &str, balance: U256) -> io::Result<()> {
        writeln!(self.out, "My {} balance: {}", symbol, balance)
    }

    pub fn nonce(&mut self, nonce: u64) -> io::Result<()> {
        writeln!(self.out, "Nonce: {}", nonce)
    }

    pub fn chain_id(&mut self, chain_id: ChainId) -> io::Result<()> {
        writeln!(self.out, "Chain ID: {}", chain_id)
    }

    pub fn gas(&mut self, gas: &GasConfig) -> io::Result<()> {
        writeln!(
            self.out,
            "Gas price: {} gwei ({} wei)",
            gas.price_gwei,
            gas.price_wei()
        )?;
        writeln!(self.out, "Gas limit: {}", gas.limit)
    }

    pub fn raw_transaction(&mut self, tx: &TxLegacy) -> io::Result<()> {
        writeln!(self.out, "Raw transaction:")?;
        match tx.to {
            TxKind::Call(to) => writeln!(self.out, "  to: {}", to.to_checksum(None))?,
            TxKind::Create => writeln!(self.out, "  to: (contract creation)")?,
        }
        writeln!(self.out, "  nonce: {}", tx.nonce)?;
        writeln!(self.out, "  gas: {}", tx.gas_limit)?;
        writeln!(self.out, "  gasPrice: {}", tx.gas_price)?;
        if let Some(chain_id) = tx.chain_id {
            writeln!(self.out, "  chainId: {}", chain_id)?;
        }
        writeln!(self.out, "  value: {}", tx.value)?;
        writeln!(self.out, "  data: {}", tx.input)
    }

    pub fn signed_transaction(&mut self, signed: &SignedClaim) -> io::Result<()> {
        let signature = signed.signed().signature();
        let v = to_eip155_value(signature.v(), signed.signed().tx().chain_id);

        writeln!(self.out, "Signed transaction:")?;
        writeln!(self.out, "  hash: {}", signed.hash())?;
        writeln!(self.out, "  r: {:#x}", signature.r())?;
        writeln!(self.out, "  s: {:#x}", signature.s())?;
        writeln!(self.out, "  v: {}", v)?;
        writeln!(self.out, "  rawTransaction: {}", signed.raw())
    }

    pub fn submitted(&mut self, tx_hash: TxHash) -> io::Result<()> {
        writeln!(self.out, "Transaction submitted: {}", tx_hash)
    }

    pub fn discarded(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Dry run: signed transaction not submitted (pass --submit to broadcast)"
        )
    }

    pub fn interface_entry(&mut self, index: usize, entry: &InterfaceEntry) -> io::Result<()> {
        writeln!(self.out, "{:>3}. {}", index, entry)
    }
}
