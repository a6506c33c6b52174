use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::conversion::StorageBackend;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Reports which artifact store this instance was started with
pub struct HealthController {
    storage_backend: StorageBackend,
}

impl HealthController {
    pub fn new(storage_backend: StorageBackend) -> Self {
        Self { storage_backend }
    }

    pub async fn health_ready(State(controller): State<Arc<HealthController>>) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "storage": controller.storage_backend.as_str(),
                "translation": "available",
                "tts": "available"
            })),
        )
    }
}
