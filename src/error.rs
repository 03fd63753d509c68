use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Record store client is not initialized")]
    ClientUnavailable,

    #[error("Request rejected by backend: {0}")]
    Rejected(String),

    #[error("All records in the batch failed: {}", .0.join("; "))]
    BatchFailed(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Message suitable for showing to the user. `None` means the caller
    /// should fall back to its own generic failure message.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Error::ClientUnavailable => Some("Service unavailable".to_string()),
            Error::Rejected(msg) | Error::NotFound(msg) | Error::AlreadyExists(msg) => {
                Some(msg.clone()).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::AlreadyExists(msg) => (StatusCode::CONFLICT, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::ClientUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service unavailable".to_string(),
            ),
            Error::Rejected(msg) => (StatusCode::BAD_GATEWAY, msg),
            Error::BatchFailed(messages) => (StatusCode::BAD_GATEWAY, messages.join("; ")),
            Error::Reqwest(err) => (
                StatusCode::BAD_GATEWAY,
                format!("External service error: {}", err),
            ),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backend_and_availability_errors_carry_user_messages() {
        assert_eq!(
            Error::ClientUnavailable.user_message().as_deref(),
            Some("Service unavailable")
        );
        assert_eq!(
            Error::Rejected("Quota exceeded".into()).user_message().as_deref(),
            Some("Quota exceeded")
        );
        assert_eq!(Error::Rejected(String::new()).user_message(), None);
        assert_eq!(Error::Internal("boom".into()).user_message(), None);
        assert_eq!(Error::BadRequest("Invalid id".into()).user_message(), None);
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            Error::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::ClientUnavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            Error::BatchFailed(vec!["a".into()]).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
