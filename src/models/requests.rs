//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::{StoredValue, MAX_VALUE_SIZE};

/// Request body for the STORE operation (PUT /store)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store: string, integer, float or array of bytes
    pub value: StoredValue,
}

impl StoreRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.value.to_bytes().len() > MAX_VALUE_SIZE {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            ));
        }
        None
    }
}

/// How GET /get/:key decodes the stored bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    /// UTF-8 text
    #[default]
    Text,
    /// Base-10 integer
    Int,
    /// Raw bytes, returned as an array of numbers
    Raw,
}

/// Query string for GET /get/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    #[serde(default, rename = "as")]
    pub decoding: Decoding,
}
