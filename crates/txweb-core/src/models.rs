//! Data models for txweb
//!
//! Transaction records mirror the upstream JSON export. Every field is
//! optional on the wire, and amounts may arrive as JSON numbers or as
//! numeric strings, so the model keeps both shapes intact.

use serde::{Deserialize, Serialize};

/// A single value read out of a transaction field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value (a JSON number)
    Number(f64),
    /// Text value
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, if it has one
    ///
    /// Text that parses as a number counts as numeric, so `"100"` and
    /// `100` compare the same way.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.parse::<f64>().ok(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// A single financial transaction record
///
/// Records are read-only once loaded. A missing field renders as an
/// empty cell, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Transaction {
    /// Human-readable timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<i64>,
    /// Transaction identifier (hash)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Sender address
    #[serde(rename = "txFrom", skip_serializing_if = "Option::is_none")]
    pub tx_from: Option<String>,
    /// Recipient address
    #[serde(rename = "txTo", skip_serializing_if = "Option::is_none")]
    pub tx_to: Option<String>,
    /// Transferred amount, as exported (number or numeric string)
    #[serde(rename = "txAmount", skip_serializing_if = "Option::is_none")]
    pub tx_amount: Option<FieldValue>,
    /// Currency code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// A dataset as returned by the provider
///
/// `count` is the provider's own record count and is displayed verbatim;
/// it is not required to match `info.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dataset {
    /// Provider-reported record count
    pub count: u64,
    /// The transaction records
    #[serde(default)]
    pub info: Vec<Transaction>,
}

// ==================== Tests ====================
