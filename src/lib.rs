pub mod backend;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::SharedStore;
use crate::config::Config;
use crate::error::Result;
use crate::navigation::RouteTree;
use crate::services::{
    application_service::ApplicationService, feedback_service::FeedbackService,
    job_service::JobService, saved_job_service::SavedJobService,
    shortlist_service::ShortlistService,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Option<SharedStore>,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub saved_job_service: SavedJobService,
    pub shortlist_service: ShortlistService,
    pub feedback: FeedbackService,
    pub navigation: Arc<RouteTree>,
}

impl AppState {
    /// Every service shares the one injected client. `None` leaves the data
    /// endpoints answering with their empty defaults.
    pub fn new(store: Option<SharedStore>, notification_capacity: usize) -> Self {
        Self {
            job_service: JobService::new(store.clone()),
            application_service: ApplicationService::new(store.clone()),
            saved_job_service: SavedJobService::new(store.clone()),
            shortlist_service: ShortlistService::new(store.clone()),
            store,
            feedback: FeedbackService::new(notification_capacity),
            navigation: Arc::new(RouteTree::build()),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let store = backend::store_from_config(config)?;
        Ok(Self::new(store, config.notification_capacity))
    }

    pub fn has_record_store(&self) -> bool {
        self.store.is_some()
    }
}

pub fn build_router(state: AppState) -> Router {
    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/openapi.json", get(routes::openapi));

    let data_api = Router::new()
        .route(
            "/api/jobs",
            get(routes::jobs::list_jobs).post(routes::jobs::create_job),
        )
        .route(
            "/api/jobs/:id",
            get(routes::jobs::get_job)
                .patch(routes::jobs::update_job)
                .delete(routes::jobs::delete_job),
        )
        .route(
            "/api/jobs/:id/applications",
            get(routes::jobs::list_job_applications),
        )
        .route(
            "/api/applications",
            get(routes::applications::list_applications)
                .post(routes::applications::create_application),
        )
        .route(
            "/api/applications/:id",
            get(routes::applications::get_application)
                .patch(routes::applications::update_application)
                .delete(routes::applications::delete_application),
        )
        .route(
            "/api/saved-jobs",
            get(routes::saved_jobs::list_saved_jobs).post(routes::saved_jobs::save_job),
        )
        .route(
            "/api/saved-jobs/:id",
            get(routes::saved_jobs::get_saved_job),
        )
        .route(
            "/api/saved-jobs/by-job/:job_id",
            get(routes::saved_jobs::is_job_saved).delete(routes::saved_jobs::unsave_job),
        )
        .route(
            "/api/shortlist-requests",
            get(routes::shortlist::list_shortlist_requests)
                .post(routes::shortlist::create_shortlist_request),
        )
        .route(
            "/api/shortlist-requests/:id",
            get(routes::shortlist::get_shortlist_request)
                .patch(routes::shortlist::update_shortlist_request)
                .delete(routes::shortlist::delete_shortlist_request),
        )
        .route(
            "/api/employers/:employer_id/shortlist-requests",
            get(routes::shortlist::list_employer_shortlist_requests),
        );

    let app_api = Router::new()
        .route(
            "/api/notifications",
            get(routes::notifications::poll_notifications),
        )
        .route("/api/navigation", get(routes::navigation::route_tree))
        .route(
            "/api/navigation/resolve",
            get(routes::navigation::resolve_route),
        );

    base_routes
        .merge(data_api)
        .merge(app_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
