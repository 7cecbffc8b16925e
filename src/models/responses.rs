//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::instrument::{CallRecord, Transcript};
use crate::store::StoreStats;

/// Response body for the STORE operation (PUT /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Success message
    pub message: String,
    /// The generated key
    pub key: String,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Value stored under '{}'", key),
            key,
        }
    }
}

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The decoded value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the replay endpoint (GET /replay/:method)
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResponse {
    pub method: String,
    pub calls: u64,
    pub history: Vec<CallRecord>,
    /// The transcript as printed text
    pub transcript: String,
}

impl From<Transcript> for ReplayResponse {
    fn from(transcript: Transcript) -> Self {
        let text = transcript.to_string();
        Self {
            method: transcript.method,
            calls: transcript.calls,
            history: transcript.history,
            transcript: text,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads that found a value
    pub hits: u64,
    /// Reads on absent keys
    pub misses: u64,
    /// Commands served by the store
    pub commands: u64,
    /// Keys currently held, instrumentation keys included
    pub total_keys: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Calls made to the instrumented store operation
    pub store_calls: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from store statistics
    pub fn new(stats: &StoreStats, store_calls: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            commands: stats.commands,
            total_keys: stats.total_keys,
            hit_rate: stats.hit_rate(),
            store_calls,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
