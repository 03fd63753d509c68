use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::shortlist_dto::{CreateShortlistPayload, UpdateShortlistPayload},
    models::{entity::Entity, shortlist::ShortlistRequest},
    routes::outcome,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/shortlist-requests",
    responses(
        (status = 200, description = "Shortlist requests, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_shortlist_requests(
    State(state): State<AppState>,
) -> Json<Vec<ShortlistRequest>> {
    outcome::list(state.shortlist_service.list().await, "shortlist requests")
}

#[utoipa::path(
    get,
    path = "/api/employers/{employer_id}/shortlist-requests",
    params(
        ("employer_id" = String, Path, description = "Employer ID")
    ),
    responses(
        (status = 200, description = "The employer's shortlist requests, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_employer_shortlist_requests(
    State(state): State<AppState>,
    Path(employer_id): Path<String>,
) -> Json<Vec<ShortlistRequest>> {
    let result = state.shortlist_service.list_by_employer(&employer_id).await;
    outcome::list(result, "shortlist requests by employer")
}

#[utoipa::path(
    get,
    path = "/api/shortlist-requests/{id}",
    params(
        ("id" = String, Path, description = "Shortlist request ID")
    ),
    responses(
        (status = 200, description = "The shortlist request, or null")
    )
)]
#[axum::debug_handler]
pub async fn get_shortlist_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Option<ShortlistRequest>> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.shortlist_service.get_by_id(id).await,
        Err(err) => Err(err),
    };
    outcome::record(result, "shortlist request")
}

#[utoipa::path(
    post,
    path = "/api/shortlist-requests",
    request_body = CreateShortlistPayload,
    responses(
        (status = 201, description = "Shortlist request submitted"),
        (status = 200, description = "Not submitted; null body")
    )
)]
#[axum::debug_handler]
pub async fn create_shortlist_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateShortlistPayload>,
) -> impl IntoResponse {
    let result = state.shortlist_service.create(payload).await;
    outcome::created(outcome::mutation(
        &state.feedback,
        result,
        ShortlistRequest::NOTICES.create,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/shortlist-requests/{id}",
    params(
        ("id" = String, Path, description = "Shortlist request ID")
    ),
    request_body = UpdateShortlistPayload,
    responses(
        (status = 200, description = "Updated shortlist request, or null")
    )
)]
#[axum::debug_handler]
pub async fn update_shortlist_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateShortlistPayload>,
) -> Json<Option<ShortlistRequest>> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.shortlist_service.update(id, payload).await,
        Err(err) => Err(err),
    };
    Json(outcome::mutation(
        &state.feedback,
        result,
        ShortlistRequest::NOTICES.update,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/shortlist-requests/{id}",
    params(
        ("id" = String, Path, description = "Shortlist request ID")
    ),
    responses(
        (status = 200, description = "Whether the request was deleted")
    )
)]
#[axum::debug_handler]
pub async fn delete_shortlist_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<bool> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.shortlist_service.delete(id).await,
        Err(err) => Err(err),
    };
    Json(outcome::mutation(&state.feedback, result, ShortlistRequest::NOTICES.delete).is_some())
}
