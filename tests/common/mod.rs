//! Shared utilities for integration testing: a programmable mock JSON-RPC node.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{hex, keccak256, Bytes, U256};
use columbus_claim::config::{ClaimConfig, PrivateKey};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Anvil's first account; publicly known, never use for real funds.
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// How the node answers `eth_call`.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallBehavior {
    /// Return ABI-encoded contract state.
    Normal,
    /// Return a JSON-RPC execution-reverted error.
    Revert,
    /// Return `0x`, as for an address without code.
    Empty,
}

/// Chain and contract state served by the mock node.
pub struct NodeState {
    pub chain_id: u64,
    pub eth_balance: U256,
    pub nonce: AtomicU64,
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
    pub token_balance: U256,
    pub call_behavior: CallBehavior,
    /// JSON-RPC method names in arrival order.
    pub methods: Mutex<Vec<String>>,
    /// Raw transactions received via `eth_sendRawTransaction`.
    pub raw_txs: Mutex<Vec<Bytes>>,
}

impl NodeState {
    /// State resembling the deployed ColumbusToken on mainnet.
    pub fn columbus() -> Self {
        Self {
            chain_id: 1,
            eth_balance: U256::from(2_000_000_000_000_000_000u128),
            nonce: AtomicU64::new(5),
            name: "ColumbusToken".to_string(),
            symbol: "CBUS".to_string(),
            total_supply: U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(18u64)),
            token_balance: U256::from(3u64) * U256::from(10u64).pow(U256::from(18u64)),
            call_behavior: CallBehavior::Normal,
            methods: Mutex::new(Vec::new()),
            raw_txs: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn with_call_behavior(mut self, behavior: CallBehavior) -> Self {
        self.call_behavior = behavior;
        self
    }

    #[allow(dead_code)]
    pub fn set_nonce(&self, nonce: u64) {
        self.nonce.store(nonce, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn methods(&self) -> Vec<String> {
        self.methods.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn raw_txs(&self) -> Vec<Bytes> {
        self.raw_txs.lock().unwrap().clone()
    }

    fn handle(&self, method: &str, params: &Value) -> Result<Value, (i64, String)> {
        self.methods.lock().unwrap().push(method.to_string());

        match method {
            "eth_chainId" => Ok(json!(format!("0x{:x}", self.chain_id))),
            "eth_getBalance" => Ok(json!(format!("{:#x}", self.eth_balance))),
            "eth_getTransactionCount" => {
                Ok(json!(format!("0x{:x}", self.nonce.load(Ordering::SeqCst))))
            }
            "eth_call" => self.handle_call(&params[0]),
            "eth_sendRawTransaction" => {
                let raw = params[0]
                    .as_str()
                    .and_then(|s| hex::decode(s).ok())
                    .ok_or((-32602, "invalid raw transaction".to_string()))?;
                let hash = keccak256(&raw);
                self.raw_txs.lock().unwrap().push(Bytes::from(raw));
                Ok(json!(hash.to_string()))
            }
            other => Err((-32601, format!("method {other} not supported"))),
        }
    }

    fn handle_call(&self, tx: &Value) -> Result<Value, (i64, String)> {
        match self.call_behavior {
            CallBehavior::Revert => return Err((3, "execution reverted".to_string())),
            CallBehavior::Empty => return Ok(json!("0x")),
            CallBehavior::Normal => {}
        }

        let input = tx
            .get("input")
            .or_else(|| tx.get("data"))
            .and_then(Value::as_str)
            .and_then(|s| hex::decode(s).ok())
            .ok_or((-32602, "missing call input".to_string()))?;

        let output = match input.get(..4) {
            Some(selector) if selector == selector_of("name()") => {
                DynSolValue::String(self.name.clone())
            }
            Some(selector) if selector == selector_of("symbol()") => {
                DynSolValue::String(self.symbol.clone())
            }
            Some(selector) if selector == selector_of("totalSupply()") => {
                DynSolValue::Uint(self.total_supply, 256)
            }
            Some(selector) if selector == selector_of("balanceOf(address)") => {
                DynSolValue::Uint(self.token_balance, 256)
            }
            _ => return Err((3, "execution reverted".to_string())),
        };

        let encoded = DynSolValue::Tuple(vec![output]).abi_encode_params();
        Ok(json!(hex::encode_prefixed(encoded)))
    }
}

/// A running mock node.
pub struct MockNode {
    pub addr: SocketAddr,
    pub state: Arc<NodeState>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Walkthrough configuration pointed at this node.
    pub fn config(&self) -> ClaimConfig {
        let mut config = ClaimConfig::default();
        config.node.rpc_url = self.url();
        config.node.rpc_timeout_secs = 5;
        config.wallet.private_key = PrivateKey::new(TEST_PRIVATE_KEY);
        config
    }
}

fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Start a mock JSON-RPC node on an ephemeral port.
pub async fn start_mock_node(state: NodeState) -> MockNode {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(state);
    let shared = state.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let state = shared.clone();
                    tokio::spawn(async move {
                        let _ = serve_one(socket, &state).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockNode { addr, state }
}

/// Start a node that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_node() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

async fn serve_one(socket: TcpStream, state: &NodeState) -> std::io::Result<()> {
    let mut reader = BufReader::new(socket);

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or("");
    let params = request.get("params").cloned().unwrap_or(Value::Null);

    let response = match state.handle(method, &params) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    };
    let body = response.to_string();

    let mut socket = reader.into_inner();
    let response_str = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    socket.write_all(response_str.as_bytes()).await?;
    socket.shutdown().await
}
