//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::Cache;
use crate::error::{CacheError, Result};
use crate::instrument::QualifiedName;
use crate::models::{
    Decoding, GetQuery, GetResponse, HealthResponse, ReplayResponse, StatsResponse, StoreRequest,
    StoreResponse,
};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
///
/// The cache owns the store handle; the store is also kept typed here so
/// its statistics can be reported.
#[derive(Clone)]
pub struct AppState {
    /// Instrumented cache facade
    pub cache: Arc<Cache>,
    /// Backing in-memory store
    pub store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new AppState, flushing `store` through [`Cache::new`].
    pub fn new(store: Arc<MemoryStore>) -> Result<Self> {
        let cache = Cache::new(store.clone())?;
        Ok(Self {
            cache: Arc::new(cache),
            store,
        })
    }
}

/// Handler for PUT /store
///
/// Stores a value under a freshly generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = state.cache.store(req.value)?;

    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value, decoded as text (default), integer or raw bytes.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    let value = match query.decoding {
        Decoding::Text => state.cache.get_str(&key)?.map(Value::from),
        Decoding::Int => state.cache.get_int(&key)?.map(Value::from),
        Decoding::Raw => state.cache.get(&key)?.map(Value::from),
    };

    match value {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /replay/:method
///
/// Returns the call count and call history of an instrumented operation.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(method): Path<String>,
) -> Result<Json<ReplayResponse>> {
    let name = QualifiedName::parse(method);
    state
        .cache
        .replay(&name)
        .map(|transcript| Json(ReplayResponse::from(transcript)))
        .ok_or_else(|| CacheError::NotFound(format!("no replayable history for {}", name)))
}

/// Handler for GET /stats
///
/// Returns store statistics and the store operation's call count.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.store.stats();
    let store_calls = state.cache.call_count(state.cache.store_operation())?;

    Ok(Json(StatsResponse::new(&stats, store_calls)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
