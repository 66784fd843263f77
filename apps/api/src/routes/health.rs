use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Liveness only; does not touch the district store.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "advisor-api",
        "version": env!("CARGO_PKG_VERSION"),
        "vendors": state.catalog.vendors().len(),
        "checkedAt": Utc::now().to_rfc3339(),
    }))
}
