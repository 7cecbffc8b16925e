//! Stored Value Module
//!
//! The payload types the cache accepts and how each is encoded for the store.

use std::fmt;

use serde::Deserialize;

use crate::instrument::RenderArgs;

// == Stored Value ==
/// A value accepted by [`Cache::store`](super::Cache::store).
///
/// Deserialises untagged from JSON: integers, floats, strings, and arrays of
/// bytes, tried in that order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl StoredValue {
    // == Encode ==
    /// Bytes written to the store for this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Bytes(bytes) => bytes.clone(),
            StoredValue::Integer(n) => n.to_string().into_bytes(),
            StoredValue::Float(f) => format_float(*f).into_bytes(),
        }
    }
}

/// Finite floats always carry a fractional part; `{}` prints integral values
/// of any magnitude without one.
fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{}.0", text)
    } else {
        text
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Text(text) => write!(f, "{:?}", text),
            StoredValue::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            StoredValue::Integer(n) => write!(f, "{}", n),
            StoredValue::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

impl RenderArgs for StoredValue {
    fn render_args(&self) -> String {
        format!("({},)", self)
    }
}

// == Conversions ==
impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(i64::from(value))
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}
