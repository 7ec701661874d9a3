//! Contract interface descriptor decoding.
//!
//! Block explorers export an ABI wrapped in an envelope whose `result` field
//! is itself a JSON-encoded string:
//!
//! ```text
//! {"status":"1","message":"OK","result":"[{\"type\":\"function\",...}]"}
//!     → ExplorerEnvelope (outer document)
//!     → ContractInterface (ordered entries + alloy JsonAbi)
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use alloy::json_abi::{Function, JsonAbi};
use serde::{Deserialize, Serialize};

use crate::contract::bundled::BUNDLED_EXPLORER_EXPORT;
use crate::contract::types::{ContractError, ContractResult};

/// Outer document of a block-explorer ABI export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplorerEnvelope {
    /// `"1"` on success, `"0"` when the explorer reports an error.
    pub status: String,
    pub message: String,
    /// JSON-encoded ABI array on success, an error message otherwise.
    pub result: String,
}

impl ExplorerEnvelope {
    /// Parse the outer envelope.
    pub fn parse(json: &str) -> ContractResult<Self> {
        serde_json::from_str(json).map_err(ContractError::Envelope)
    }

    /// Return the inner ABI text, or the explorer's error.
    pub fn into_abi_json(self) -> ContractResult<String> {
        if self.status != "1" {
            return Err(ContractError::Descriptor(format!(
                "explorer export failed ({}): {}",
                self.message, self.result
            )));
        }
        Ok(self.result)
    }
}

/// Kind of an interface entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Function,
    Constructor,
    Event,
    Error,
    Fallback,
    Receive,
}

/// Declared state mutability of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

impl Mutability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::Nonpayable => "nonpayable",
            Mutability::Payable => "payable",
        }
    }
}

/// One input or output parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ParamDescriptor>,
}

/// One entry of the descriptor, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceEntry {
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<ParamDescriptor>,
    #[serde(default)]
    pub outputs: Vec<ParamDescriptor>,
    #[serde(default)]
    pub state_mutability: Option<Mutability>,
    /// Pre-0.5 compiler flag, superseded by `stateMutability`.
    #[serde(default)]
    pub constant: Option<bool>,
    /// Pre-0.5 compiler flag, superseded by `stateMutability`.
    #[serde(default)]
    pub payable: Option<bool>,
    #[serde(default)]
    pub anonymous: Option<bool>,
}

impl InterfaceEntry {
    /// Effective mutability, falling back to the legacy flags.
    pub fn mutability(&self) -> Mutability {
        if let Some(m) = self.state_mutability {
            return m;
        }
        match (self.constant, self.payable) {
            (Some(true), _) => Mutability::View,
            (_, Some(true)) => Mutability::Payable,
            _ => Mutability::Nonpayable,
        }
    }

    /// True for callable methods (`type: function`).
    pub fn is_method(&self) -> bool {
        self.kind == EntryKind::Function
    }

    /// Canonical signature, e.g. `balanceOf(address)`.
    pub fn signature(&self) -> String {
        let inputs: Vec<&str> = self.inputs.iter().map(|p| p.ty.as_str()).collect();
        format!("{}({})", self.name.as_deref().unwrap_or(""), inputs.join(","))
    }
}

impl fmt::Display for InterfaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Function => {
                let outputs: Vec<&str> = self.outputs.iter().map(|p| p.ty.as_str()).collect();
                write!(f, "function {}", self.signature())?;
                if !outputs.is_empty() {
                    write!(f, " returns ({})", outputs.join(","))?;
                }
                write!(f, " [{}]", self.mutability().as_str())
            }
            EntryKind::Event => write!(f, "event {}", self.signature()),
            EntryKind::Error => write!(f, "error {}", self.signature()),
            EntryKind::Constructor => {
                let inputs: Vec<&str> = self.inputs.iter().map(|p| p.ty.as_str()).collect();
                write!(f, "constructor({}) [{}]", inputs.join(","), self.mutability().as_str())
            }
            EntryKind::Fallback => write!(f, "fallback [{}]", self.mutability().as_str()),
            EntryKind::Receive => write!(f, "receive [payable]"),
        }
    }
}

/// Parsed interface descriptor.
///
/// `entries` keeps the document order for display; `abi` is the alloy view
/// used for encoding calls and decoding results.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInterface {
    entries: Vec<InterfaceEntry>,
    abi: JsonAbi,
}

impl ContractInterface {
    /// Decode a block-explorer export in one step.
    pub fn from_explorer_export(json: &str) -> ContractResult<Self> {
        let abi_json = ExplorerEnvelope::parse(json)?.into_abi_json()?;
        Self::from_abi_json(&abi_json)
    }

    /// Decode a bare ABI array.
    pub fn from_abi_json(abi_json: &str) -> ContractResult<Self> {
        let entries: Vec<InterfaceEntry> = serde_json::from_str(abi_json)
            .map_err(|e| ContractError::Descriptor(e.to_string()))?;
        let abi: JsonAbi = serde_json::from_str(abi_json)
            .map_err(|e| ContractError::Descriptor(e.to_string()))?;

        if !entries.iter().any(InterfaceEntry::is_method) {
            return Err(ContractError::Descriptor(
                "descriptor declares no methods".to_string(),
            ));
        }

        Ok(Self { entries, abi })
    }

    /// Load a descriptor file, accepting either an explorer export or a bare
    /// ABI array.
    pub fn from_path(path: &Path) -> ContractResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ContractError::Io {
            path: path.display().to_string(),
            source,
        })?;

        if content.trim_start().starts_with('[') {
            Self::from_abi_json(&content)
        } else {
            Self::from_explorer_export(&content)
        }
    }

    /// The descriptor compiled into the binary.
    pub fn bundled() -> ContractResult<Self> {
        Self::from_explorer_export(BUNDLED_EXPLORER_EXPORT)
    }

    /// Load from `path` when given, else use the bundled descriptor.
    pub fn load(path: Option<&Path>) -> ContractResult<Self> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading interface descriptor");
                Self::from_path(path)
            }
            None => Self::bundled(),
        }
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[InterfaceEntry] {
        &self.entries
    }

    /// Callable methods in document order.
    pub fn methods(&self) -> impl Iterator<Item = &InterfaceEntry> {
        self.entries.iter().filter(|e| e.is_method())
    }

    /// Look up a method by name. Overloads resolve to the first declaration.
    pub fn function(&self, name: &str) -> ContractResult<&Function> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| ContractError::UnknownMethod(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABI_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/abi/ColumbusTokenAbi.json");

    #[test]
    fn test_bundled_descriptor_has_ordered_methods() {
        let interface = ContractInterface::bundled().unwrap();
        let names: Vec<&str> = interface
            .methods()
            .filter_map(|m| m.name.as_deref())
            .collect();

        assert_eq!(names.len(), 14);
        assert_eq!(&names[..5], ["name", "approve", "getBalance", "totalSupply", "getToken"]);
        assert_eq!(names.last(), Some(&"allowance"));
        assert_eq!(interface.entries().len(), 18);
    }

    #[test]
    fn test_file_and_inline_descriptor_match() {
        let from_file = ContractInterface::from_path(Path::new(ABI_FILE)).unwrap();
        let inline = ContractInterface::bundled().unwrap();
        assert_eq!(from_file, inline);

        let file_text = std::fs::read_to_string(ABI_FILE).unwrap();
        assert_eq!(
            ExplorerEnvelope::parse(&file_text).unwrap(),
            ExplorerEnvelope::parse(BUNDLED_EXPLORER_EXPORT).unwrap()
        );
    }

    #[test]
    fn test_mutability_flags() {
        let interface = ContractInterface::bundled().unwrap();
        let by_name = |n: &str| {
            interface
                .methods()
                .find(|m| m.name.as_deref() == Some(n))
                .unwrap()
                .mutability()
        };
        assert_eq!(by_name("name"), Mutability::View);
        assert_eq!(by_name("balanceOf"), Mutability::View);
        assert_eq!(by_name("getToken"), Mutability::Nonpayable);
        assert_eq!(by_name("transfer"), Mutability::Nonpayable);
    }

    #[test]
    fn test_legacy_flags_without_state_mutability() {
        let interface = ContractInterface::from_abi_json(
            r#"[{"constant":true,"inputs":[],"name":"owner","outputs":[{"name":"","type":"address"}],"payable":false,"type":"function"}]"#,
        )
        .unwrap();
        assert_eq!(interface.entries()[0].mutability(), Mutability::View);
    }

    #[test]
    fn test_function_lookup() {
        let interface = ContractInterface::bundled().unwrap();
        let balance_of = interface.function("balanceOf").unwrap();
        assert_eq!(balance_of.signature(), "balanceOf(address)");

        let err = interface.function("mint").unwrap_err();
        assert!(matches!(err, ContractError::UnknownMethod(ref m) if m == "mint"));
    }

    #[test]
    fn test_explorer_error_envelope() {
        let err = ContractInterface::from_explorer_export(
            r#"{"status":"0","message":"NOTOK","result":"Contract source code not verified"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not verified"));
    }

    #[test]
    fn test_malformed_envelope() {
        let err = ContractInterface::from_explorer_export("{not json").unwrap_err();
        assert!(matches!(err, ContractError::Envelope(_)));
    }

    #[test]
    fn test_descriptor_without_methods_rejected() {
        let err = ContractInterface::from_abi_json(
            r#"[{"anonymous":false,"inputs":[],"name":"Ping","type":"event"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Descriptor(_)));
    }

    #[test]
    fn test_entry_display() {
        let interface = ContractInterface::bundled().unwrap();
        let rendered: Vec<String> = interface.entries().iter().map(|e| e.to_string()).collect();
        assert_eq!(rendered[0], "function name() returns (string) [view]");
        assert!(rendered.contains(&"function getToken() [nonpayable]".to_string()));
        assert!(rendered.contains(&"event GeneratedToken(address)".to_string()));
        assert!(rendered.contains(&"constructor() [nonpayable]".to_string()));
    }
}
