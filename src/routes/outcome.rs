//! The operation boundary: every handler funnels its service result through
//! here, so errors become the safe default (`[]`, `null`, `false`) and
//! mutations post their notices.

use axum::{http::StatusCode, Json};
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::models::entity::ActionNotices;
use crate::services::feedback_service::FeedbackService;
use crate::services::record_service::Mutation;
use crate::utils::ids::parse_record_id;

/// Path id as an integer. An unreadable id never reaches the backend.
pub(crate) fn path_id(raw: &str) -> Result<i64> {
    parse_record_id(raw).ok_or_else(|| Error::BadRequest(format!("Invalid id: {:?}", raw)))
}

pub(crate) fn list<T>(result: Result<Vec<T>>, what: &str) -> Json<Vec<T>> {
    match result {
        Ok(items) => Json(items),
        Err(err) => {
            error!("Error fetching {}: {}", what, err);
            Json(Vec::new())
        }
    }
}

pub(crate) fn record<T>(result: Result<T>, what: &str) -> Json<Option<T>> {
    match result {
        Ok(item) => Json(Some(item)),
        Err(Error::NotFound(msg)) => {
            info!("{} lookup found nothing: {}", what, msg);
            Json(None)
        }
        Err(err) => {
            error!("Error fetching {}: {}", what, err);
            Json(None)
        }
    }
}

pub(crate) fn flag(result: Result<bool>, what: &str) -> Json<bool> {
    Json(result.unwrap_or_else(|err| {
        error!("Error checking {}: {}", what, err);
        false
    }))
}

/// Posts the per-record failures and the success notice, or reports the
/// error. Returns the record only when the write went through.
pub(crate) fn mutation<T>(
    feedback: &FeedbackService,
    result: Result<Mutation<T>>,
    notices: ActionNotices,
) -> Option<T> {
    match result {
        Ok(mutation) => {
            for message in mutation.failures.iter().filter(|m| !m.is_empty()) {
                feedback.error(message.clone());
            }
            if let Some(message) = notices.success {
                feedback.success(message);
            }
            Some(mutation.record)
        }
        Err(err) => {
            report_failure(feedback, &err, notices.failure);
            None
        }
    }
}

pub(crate) fn report_failure(feedback: &FeedbackService, err: &Error, fallback: &str) {
    error!("{}: {}", fallback, err);
    match err {
        Error::AlreadyExists(message) => feedback.info(message.clone()),
        Error::BatchFailed(messages) => {
            messages
                .iter()
                .filter(|m| !m.is_empty())
                .for_each(|m| feedback.error(m.clone()));
        }
        other => feedback.error(other.user_message().unwrap_or_else(|| fallback.to_string())),
    }
}

/// `201` with the record, or `200` with `null` when the create failed.
pub(crate) fn created<T>(record: Option<T>) -> (StatusCode, Json<Option<T>>) {
    let status = if record.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(record))
}
