use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::saved_job_dto::SaveJobPayload,
    models::{entity::Entity, saved_job::SavedJob},
    routes::outcome,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/saved-jobs",
    responses(
        (status = 200, description = "Saved jobs, most recently saved first")
    )
)]
#[axum::debug_handler]
pub async fn list_saved_jobs(State(state): State<AppState>) -> Json<Vec<SavedJob>> {
    outcome::list(state.saved_job_service.list().await, "saved jobs")
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs/{id}",
    params(
        ("id" = String, Path, description = "Saved-job record ID")
    ),
    responses(
        (status = 200, description = "The saved job, or null")
    )
)]
#[axum::debug_handler]
pub async fn get_saved_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Option<SavedJob>> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.saved_job_service.get_by_id(id).await,
        Err(err) => Err(err),
    };
    outcome::record(result, "saved job")
}

#[utoipa::path(
    post,
    path = "/api/saved-jobs",
    request_body = SaveJobPayload,
    responses(
        (status = 201, description = "Job saved"),
        (status = 200, description = "Already saved or failed; null body")
    )
)]
#[axum::debug_handler]
pub async fn save_job(
    State(state): State<AppState>,
    Json(payload): Json<SaveJobPayload>,
) -> impl IntoResponse {
    let result = state.saved_job_service.create(payload).await;
    outcome::created(outcome::mutation(
        &state.feedback,
        result,
        SavedJob::NOTICES.create,
    ))
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs/by-job/{job_id}",
    params(
        ("job_id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Whether the job is saved")
    )
)]
#[axum::debug_handler]
pub async fn is_job_saved(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Json<bool> {
    let result = match outcome::path_id(&job_id) {
        Ok(job_id) => state.saved_job_service.is_saved(job_id).await,
        Err(err) => Err(err),
    };
    outcome::flag(result, "saved job")
}

#[utoipa::path(
    delete,
    path = "/api/saved-jobs/by-job/{job_id}",
    params(
        ("job_id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Whether the job was unsaved")
    )
)]
#[axum::debug_handler]
pub async fn unsave_job(State(state): State<AppState>, Path(job_id): Path<String>) -> Json<bool> {
    let result = match outcome::path_id(&job_id) {
        Ok(job_id) => state.saved_job_service.delete(job_id).await,
        Err(err) => Err(err),
    };
    Json(outcome::mutation(&state.feedback, result, SavedJob::NOTICES.delete).is_some())
}
