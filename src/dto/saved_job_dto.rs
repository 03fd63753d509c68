use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveJobPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(min = 1))]
    pub job_id: String,
}
