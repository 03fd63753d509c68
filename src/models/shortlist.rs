use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::shortlist_dto::{CreateShortlistPayload, UpdateShortlistPayload};
use crate::error::Result;
use crate::models::entity::{ActionNotices, Creatable, Entity, Notices, Patchable};
use crate::models::reference;
use crate::utils::ids::parse_reference;
use crate::utils::lenient::{self, non_empty};
use crate::utils::time::{timestamp_or, to_iso_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortlistRequestRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        rename = "Name",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "employer_id_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub employer_id: Option<String>,
    #[serde(
        rename = "job_id_c",
        deserialize_with = "reference::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_id: Option<i64>,
    #[serde(
        rename = "criteria_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub criteria: Option<String>,
    #[serde(
        rename = "number_of_candidates_c",
        deserialize_with = "lenient::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_candidates: Option<i64>,
    #[serde(
        rename = "urgency_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub urgency: Option<String>,
    #[serde(
        rename = "additional_notes_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_notes: Option<String>,
    #[serde(
        rename = "status_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        rename = "request_date_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistRequest {
    #[serde(rename = "Id")]
    pub id: i64,
    pub employer_id: String,
    pub job_id: String,
    pub criteria: String,
    pub number_of_candidates: i64,
    pub urgency: String,
    pub additional_notes: String,
    pub status: String,
    pub request_date: DateTime<Utc>,
}

pub const DEFAULT_URGENCY: &str = "medium";
pub const DEFAULT_SHORTLIST_STATUS: &str = "pending";

impl Entity for ShortlistRequest {
    type Row = ShortlistRequestRow;

    const TABLE: &'static str = "shortlist_request_c";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "employer_id_c",
        "job_id_c",
        "criteria_c",
        "number_of_candidates_c",
        "urgency_c",
        "additional_notes_c",
        "status_c",
        "request_date_c",
    ];
    const DATE_FIELD: &'static str = "request_date_c";
    const PLURAL: &'static str = "shortlist requests";
    const NOTICES: Notices = Notices {
        create: ActionNotices {
            success: Some("Shortlist request submitted successfully"),
            failure: "Failed to submit shortlist request",
        },
        update: ActionNotices {
            success: Some("Shortlist request updated successfully"),
            failure: "Failed to update shortlist request",
        },
        delete: ActionNotices {
            success: Some("Shortlist request deleted successfully"),
            failure: "Failed to delete shortlist request",
        },
    };

    fn from_row(row: ShortlistRequestRow, now: DateTime<Utc>) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            employer_id: row.employer_id.unwrap_or_default(),
            job_id: reference::to_text(row.job_id),
            criteria: row.criteria.unwrap_or_default(),
            number_of_candidates: row.number_of_candidates.unwrap_or_default(),
            urgency: non_empty(row.urgency).unwrap_or_else(|| DEFAULT_URGENCY.to_string()),
            additional_notes: row.additional_notes.unwrap_or_default(),
            status: non_empty(row.status).unwrap_or_else(|| DEFAULT_SHORTLIST_STATUS.to_string()),
            request_date: timestamp_or(row.request_date.as_deref(), now),
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_date(&self) -> DateTime<Utc> {
        self.request_date
    }
}

impl Creatable for ShortlistRequest {
    type Draft = CreateShortlistPayload;

    fn draft_row(
        draft: CreateShortlistPayload,
        now: DateTime<Utc>,
    ) -> Result<ShortlistRequestRow> {
        let job_id = parse_reference("jobId", &draft.job_id)?;
        Ok(ShortlistRequestRow {
            id: None,
            name: Some(format!("Shortlist Request - {}", now.format("%-m/%-d/%Y"))),
            employer_id: Some(draft.employer_id),
            job_id: Some(job_id),
            criteria: draft.criteria,
            number_of_candidates: Some(draft.number_of_candidates),
            urgency: draft.urgency,
            additional_notes: draft.additional_notes,
            status: Some(
                non_empty(draft.status).unwrap_or_else(|| DEFAULT_SHORTLIST_STATUS.to_string()),
            ),
            request_date: Some(to_iso_string(now)),
        })
    }
}

impl Patchable for ShortlistRequest {
    type Patch = UpdateShortlistPayload;

    fn patch_row(patch: UpdateShortlistPayload) -> Result<ShortlistRequestRow> {
        let job_id = match non_empty(patch.job_id) {
            Some(raw) => Some(parse_reference("jobId", &raw)?),
            None => None,
        };
        Ok(ShortlistRequestRow {
            employer_id: non_empty(patch.employer_id),
            job_id,
            criteria: non_empty(patch.criteria),
            number_of_candidates: patch.number_of_candidates.filter(|n| *n != 0),
            urgency: non_empty(patch.urgency),
            additional_notes: non_empty(patch.additional_notes),
            status: non_empty(patch.status),
            ..ShortlistRequestRow::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn sparse_row_gets_read_defaults() {
        let row: ShortlistRequestRow = serde_json::from_value(json!({
            "Id": 11,
            "employer_id_c": 300,
            "number_of_candidates_c": null
        }))
        .unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();
        let request = ShortlistRequest::from_row(row, now);

        assert_eq!(request.employer_id, "300");
        assert_eq!(request.job_id, "");
        assert_eq!(request.number_of_candidates, 0);
        assert_eq!(request.urgency, "medium");
        assert_eq!(request.status, "pending");
        assert_eq!(request.request_date, now);
    }

    #[test]
    fn draft_row_uses_request_date_in_name() {
        let draft = CreateShortlistPayload {
            employer_id: "emp-1".into(),
            job_id: "9".into(),
            number_of_candidates: 5,
            urgency: Some("high".into()),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 15, 0, 0).unwrap();
        let wire = serde_json::to_value(ShortlistRequest::draft_row(draft, now).unwrap()).unwrap();

        assert_eq!(wire["Name"], json!("Shortlist Request - 3/7/2025"));
        assert_eq!(wire["job_id_c"], json!(9));
        assert_eq!(wire["number_of_candidates_c"], json!(5));
        assert_eq!(wire["status_c"], json!("pending"));
    }

    #[test]
    fn patch_row_skips_zero_and_parses_reference() {
        let patch = UpdateShortlistPayload {
            job_id: Some("12".into()),
            number_of_candidates: Some(0),
            urgency: Some("low".into()),
            ..Default::default()
        };
        let wire = serde_json::to_value(ShortlistRequest::patch_row(patch).unwrap()).unwrap();
        assert_eq!(wire, json!({ "job_id_c": 12, "urgency_c": "low" }));
    }

    #[test]
    fn patch_row_rejects_bad_reference() {
        let patch = UpdateShortlistPayload {
            job_id: Some("twelve".into()),
            ..Default::default()
        };
        assert!(ShortlistRequest::patch_row(patch).is_err());
    }
}
