use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload},
    models::{application::Application, entity::Entity},
    routes::outcome,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "Applications, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(State(state): State<AppState>) -> Json<Vec<Application>> {
    outcome::list(state.application_service.list().await, "applications")
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "The application, or null")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Option<Application>> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.application_service.get_by_id(id).await,
        Err(err) => Err(err),
    };
    outcome::record(result, "application")
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application submitted"),
        (status = 200, description = "Application not submitted; null body")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> impl IntoResponse {
    let result = state.application_service.create(payload).await;
    outcome::created(outcome::mutation(
        &state.feedback,
        result,
        Application::NOTICES.create,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Updated application, or null")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateApplicationPayload>,
) -> Json<Option<Application>> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.application_service.update(id, payload).await,
        Err(err) => Err(err),
    };
    Json(outcome::mutation(
        &state.feedback,
        result,
        Application::NOTICES.update,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Whether the application was deleted")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<bool> {
    let result = match outcome::path_id(&id) {
        Ok(id) => state.application_service.delete(id).await,
        Err(err) => Err(err),
    };
    Json(outcome::mutation(&state.feedback, result, Application::NOTICES.delete).is_some())
}
