use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::saved_job_dto::SaveJobPayload;
use crate::error::Result;
use crate::models::entity::{ActionNotices, Creatable, Entity, Notices};
use crate::models::reference;
use crate::utils::ids::parse_reference;
use crate::utils::lenient;
use crate::utils::time::{timestamp_or, to_iso_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedJobRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        rename = "Name",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "job_id_c",
        deserialize_with = "reference::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_id: Option<i64>,
    #[serde(
        rename = "saved_at_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SavedJob {
    pub id: i64,
    pub job_id: Option<i64>,
    pub saved_at: DateTime<Utc>,
}

impl Entity for SavedJob {
    type Row = SavedJobRow;

    const TABLE: &'static str = "saved_job_c";
    const FIELDS: &'static [&'static str] = &["Name", "job_id_c", "saved_at_c"];
    const DATE_FIELD: &'static str = "saved_at_c";
    const PLURAL: &'static str = "saved jobs";
    const NOTICES: Notices = Notices {
        create: ActionNotices {
            success: None,
            failure: "Failed to save job",
        },
        update: ActionNotices {
            success: None,
            failure: "Failed to update saved job",
        },
        delete: ActionNotices {
            success: None,
            failure: "Failed to delete saved job",
        },
    };

    fn from_row(row: SavedJobRow, now: DateTime<Utc>) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            job_id: row.job_id,
            saved_at: timestamp_or(row.saved_at.as_deref(), now),
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_date(&self) -> DateTime<Utc> {
        self.saved_at
    }
}

impl Creatable for SavedJob {
    type Draft = SaveJobPayload;

    fn draft_row(draft: SaveJobPayload, now: DateTime<Utc>) -> Result<SavedJobRow> {
        let job_id = parse_reference("jobId", &draft.job_id)?;
        Ok(SavedJobRow {
            id: None,
            name: Some(format!("Saved Job - {}", job_id)),
            job_id: Some(job_id),
            saved_at: Some(to_iso_string(now)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn reads_with_pascal_case_names() {
        let row: SavedJobRow =
            serde_json::from_value(json!({ "Id": 2, "job_id_c": { "Id": 8 } })).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let saved = SavedJob::from_row(row, now);

        let wire = serde_json::to_value(&saved).unwrap();
        assert_eq!(wire["Id"], json!(2));
        assert_eq!(wire["JobId"], json!(8));
        assert_eq!(saved.saved_at, now);
    }

    #[test]
    fn missing_reference_reads_as_null() {
        let row: SavedJobRow = serde_json::from_value(json!({ "Id": 2 })).unwrap();
        let saved = SavedJob::from_row(row, Utc::now());
        assert_eq!(serde_json::to_value(&saved).unwrap()["JobId"], json!(null));
    }

    #[test]
    fn draft_row_names_after_job() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let row = SavedJob::draft_row(SaveJobPayload { job_id: "42".into() }, now).unwrap();
        assert_eq!(row.name.as_deref(), Some("Saved Job - 42"));
        assert_eq!(row.job_id, Some(42));
        assert_eq!(row.saved_at.as_deref(), Some("2025-06-01T00:00:00.000Z"));
    }
}
