//! Health check handlers

use axum::Json;
use serde_json::{json, Value};

/// Liveness check
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness check
///
/// The reference deployment keeps its state in memory, so readiness
/// equals liveness; a SQL-backed deployment would ping its pool here.
pub async fn readiness_check() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}
