//! Liveness probe endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
}

/// Confirms the backend is up.
///
/// # Endpoint
///
/// `GET /api/hello`
pub async fn hello_handler() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Backend is running",
    })
}
