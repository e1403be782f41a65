use axum::{response::IntoResponse, Json};

use crate::types::Envelope;

// Liveness probe - no auth, no storage access
pub async fn health() -> impl IntoResponse {
    Json(Envelope::new(
        "ZahnArchiv API is running",
        serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
    ))
}
