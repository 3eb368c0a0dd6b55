use axum::Json;
use serde_json::{json, Value};

/// GET /health (also served at GET /)
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "careermatrix-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
