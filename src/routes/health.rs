use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let record_store = if state.has_record_store() {
        "configured"
    } else {
        "unavailable"
    };
    let body = json!({
        "status": "ok",
        "record_store": record_store,
    });
    (StatusCode::OK, Json(body))
}
