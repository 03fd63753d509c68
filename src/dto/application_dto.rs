use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub candidate_name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(min = 1))]
    pub job_id: String,
}

/// The job an application belongs to cannot be changed after submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    pub candidate_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub status: Option<String>,
}
