/*
 * Responsibility
 * - GET /health (liveness probe)
 * - Stays outside the bearer middleware on purpose
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
