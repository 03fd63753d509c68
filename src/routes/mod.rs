pub mod applications;
pub mod health;
pub mod jobs;
pub mod navigation;
pub mod notifications;
pub mod outcome;
pub mod saved_jobs;
pub mod shortlist;

use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::{
    application_dto::{CreateApplicationPayload, UpdateApplicationPayload},
    job_dto::{CreateJobPayload, UpdateJobPayload},
    saved_job_dto::SaveJobPayload,
    shortlist_dto::{CreateShortlistPayload, UpdateShortlistPayload},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        jobs::list_jobs,
        jobs::get_job,
        jobs::create_job,
        jobs::update_job,
        jobs::delete_job,
        jobs::list_job_applications,
        applications::list_applications,
        applications::get_application,
        applications::create_application,
        applications::update_application,
        applications::delete_application,
        saved_jobs::list_saved_jobs,
        saved_jobs::get_saved_job,
        saved_jobs::save_job,
        saved_jobs::is_job_saved,
        saved_jobs::unsave_job,
        shortlist::list_shortlist_requests,
        shortlist::list_employer_shortlist_requests,
        shortlist::get_shortlist_request,
        shortlist::create_shortlist_request,
        shortlist::update_shortlist_request,
        shortlist::delete_shortlist_request,
        notifications::poll_notifications,
        navigation::route_tree,
        navigation::resolve_route,
    ),
    components(schemas(
        CreateJobPayload,
        UpdateJobPayload,
        CreateApplicationPayload,
        UpdateApplicationPayload,
        SaveJobPayload,
        CreateShortlistPayload,
        UpdateShortlistPayload,
    )),
    tags(
        (name = "jobboard", description = "Job board data API")
    )
)]
pub struct ApiDoc;

pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
