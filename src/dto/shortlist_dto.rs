use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortlistPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(min = 1))]
    pub employer_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(min = 1))]
    pub job_id: String,
    pub criteria: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    #[validate(range(min = 1))]
    pub number_of_candidates: i64,
    pub urgency: Option<String>,
    pub additional_notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShortlistPayload {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub employer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub job_id: Option<String>,
    pub criteria: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub number_of_candidates: Option<i64>,
    pub urgency: Option<String>,
    pub additional_notes: Option<String>,
    pub status: Option<String>,
}
