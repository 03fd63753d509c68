use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::job_dto::{CreateJobPayload, UpdateJobPayload},
    models::{application::Application, entity::Entity, job::Job},
    routes::outcome,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Jobs, newest first; empty on any failure")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    outcome::list(state.job_service.list().await, "jobs")
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "The job, or null")
    )
)]
#[axum::debug_handler]
pub async fn get_job(State(state): State<AppState>, Path(id): Path<String>) -> Json<Option<Job>> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.job_service.get_by_id(id).await,
        Err(err) => Err(err),
    };
    outcome::record(result, "job")
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job posted"),
        (status = 200, description = "Job not created; null body")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> impl IntoResponse {
    let result = state.job_service.create(payload).await;
    outcome::created(outcome::mutation(&state.feedback, result, Job::NOTICES.create))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Updated job, or null")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateJobPayload>,
) -> Json<Option<Job>> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.job_service.update(id, payload).await,
        Err(err) => Err(err),
    };
    Json(outcome::mutation(&state.feedback, result, Job::NOTICES.update))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Whether the job was deleted")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(State(state): State<AppState>, Path(id): Path<String>) -> Json<bool> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.job_service.delete(id).await,
        Err(err) => Err(err),
    };
    Json(outcome::mutation(&state.feedback, result, Job::NOTICES.delete).is_some())
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/applications",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications for the job, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_job_applications(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Application>> {
    let result = match outcome::path_id(&id) {
        Ok(job_id) => state.application_service.list_by_job(job_id).await,
        Err(err) => Err(err),
    };
    outcome::list(result, "applications by job")
}
