// handlers/system.rs - unauthenticated service endpoints
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service identity and route overview
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "Note server is running",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": ["POST /v1/register", "POST /v1/login"],
            "notes": ["POST|GET|PATCH|DELETE /v1/note", "GET /v1/allnotes"],
            "account": ["DELETE /v1/deleteuser"],
        }
    }))
}

/// GET /health - reports 503 while the database is unreachable
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.users.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "message": "database unavailable",
                    "timestamp": now,
                    "database": "degraded"
                })),
            )
        }
    }
}
