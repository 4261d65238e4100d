use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Root document whose only job is to point at the first data document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceDocument {
    pub data_location: String,
}

/// Data document that also points at the next document in the chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntermediateDocument {
    pub data_location: String,
    pub data: Vec<RawRecord>,
}

/// Data document at a fixed location, with no further pointer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerminalDocument {
    pub data: Vec<RawRecord>,
}

/// One row of source data: a combined `"First Last"` name and an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub id: RecordId,
}

/// Record identifier, kept in the type it had on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole-valued floats print without a fraction: `1.0` shows as `1`.
            RecordId::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() => write!(f, "{v}"),
                _ => write!(f, "{n}"),
            },
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// Parse a fetched body into one of the document shapes.
///
/// `location` is only used to label the error.
pub fn parse_document<T: DeserializeOwned>(location: &str, body: &[u8]) -> Result<T, ChainError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ChainError::parse(location, format!("invalid UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    serde_json::from_str(text).map_err(|e| ChainError::parse(location, e))
}
