use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub company: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::lines")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient::lines")]
    pub benefits: Vec<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_lines")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::optional_lines")]
    pub benefits: Option<Vec<String>>,
    pub status: Option<String>,
}
