// handlers/public/mod.rs - Public handlers (no authentication)
//
// Liveness endpoints used by deployment checks. Neither touches HubSpot.

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service banner
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "HubSpot middleware running",
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.environment,
            "auth_required": state.config.security.require_auth,
        }
    }))
}

/// GET /health - liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
