use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::{services::feedback_service::Notice, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    #[serde(default)]
    pub after: u64,
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(
        ("after" = Option<u64>, Query, description = "Return notices with a larger sequence number")
    ),
    responses(
        (status = 200, description = "Pending notices, oldest first")
    )
)]
#[axum::debug_handler]
pub async fn poll_notifications(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Json<Vec<Notice>> {
    Json(state.feedback.since(query.after))
}
