use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{error::Error, error::Result, AppState};

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "The full route tree")
    )
)]
#[axum::debug_handler]
pub async fn route_tree(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.navigation.root().clone())
}

#[utoipa::path(
    get,
    path = "/api/navigation/resolve",
    params(
        ("path" = String, Query, description = "Browser path to resolve")
    ),
    responses(
        (status = 200, description = "Matched view, params and access tag"),
        (status = 404, description = "No route matches")
    )
)]
#[axum::debug_handler]
pub async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<impl IntoResponse> {
    let found = state
        .navigation
        .resolve(&query.path)
        .ok_or_else(|| Error::NotFound(format!("No route matches {}", query.path)))?;
    Ok(Json(found))
}
