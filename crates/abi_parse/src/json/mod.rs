//! Interchange objects: the JSON ABI shape of fragments and parameters.
//!
//! These are plain data carriers. Validation and canonicalization happen in
//! `ParamType::from_json` / `Fragment::from_json`; the structs here accept any
//! field combination a JSON ABI file may contain (unknown fields are ignored).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::AbiError;

/// One fragment of a JSON ABI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFragment {
    /// Fragment kind (`function`, `event`, …). Absent means `function`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Legacy mutability flag, only consulted when `state_mutability` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<JsonGas>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<JsonParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<JsonParam>>,
}

/// One parameter (or tuple component) of a JSON ABI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<JsonParam>>,
    /// Solidity-level type name; accepted and ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

/// A gas limit, written either as a JSON number or a decimal string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonGas {
    Number(u64),
    Text(String),
}

impl JsonGas {
    pub fn value(&self) -> Result<u64, AbiError> {
        match self {
            JsonGas::Number(value) => Ok(*value),
            JsonGas::Text(text) => text
                .parse()
                .map_err(|_| AbiError::invalid_fragment(format!("invalid gas {text:?}"))),
        }
    }
}

impl fmt::Display for JsonFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serde_json::to_string(self).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Display for JsonParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serde_json::to_string(self).map_err(|_| fmt::Error)?)
    }
}
