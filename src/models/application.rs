use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload};
use crate::error::Result;
use crate::models::entity::{ActionNotices, Creatable, Entity, Notices, Patchable};
use crate::models::reference;
use crate::utils::ids::parse_reference;
use crate::utils::lenient::{self, non_empty};
use crate::utils::time::{timestamp_or, to_iso_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        rename = "Name",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "candidate_name_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub candidate_name: Option<String>,
    #[serde(
        rename = "email_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        rename = "phone_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        rename = "cover_letter_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_letter: Option<String>,
    #[serde(
        rename = "resume_url_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub resume_url: Option<String>,
    #[serde(
        rename = "status_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        rename = "submitted_date_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_date: Option<String>,
    #[serde(
        rename = "job_id_c",
        deserialize_with = "reference::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "Id")]
    pub id: i64,
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume_url: String,
    pub status: String,
    pub submitted_date: DateTime<Utc>,
    pub job_id: String,
}

pub const DEFAULT_APPLICATION_STATUS: &str = "submitted";

impl Entity for Application {
    type Row = ApplicationRow;

    const TABLE: &'static str = "application_c";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "candidate_name_c",
        "email_c",
        "phone_c",
        "cover_letter_c",
        "resume_url_c",
        "status_c",
        "submitted_date_c",
        "job_id_c",
    ];
    const DATE_FIELD: &'static str = "submitted_date_c";
    const PLURAL: &'static str = "applications";
    const NOTICES: Notices = Notices {
        create: ActionNotices {
            success: Some("Application submitted successfully"),
            failure: "Failed to submit application",
        },
        update: ActionNotices {
            success: Some("Application updated successfully"),
            failure: "Failed to update application",
        },
        delete: ActionNotices {
            success: Some("Application deleted successfully"),
            failure: "Failed to delete application",
        },
    };

    fn from_row(row: ApplicationRow, now: DateTime<Utc>) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            candidate_name: row.candidate_name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            cover_letter: row.cover_letter.unwrap_or_default(),
            resume_url: row.resume_url.unwrap_or_default(),
            status: non_empty(row.status)
                .unwrap_or_else(|| DEFAULT_APPLICATION_STATUS.to_string()),
            submitted_date: timestamp_or(row.submitted_date.as_deref(), now),
            job_id: reference::to_text(row.job_id),
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_date(&self) -> DateTime<Utc> {
        self.submitted_date
    }
}

impl Creatable for Application {
    type Draft = CreateApplicationPayload;

    fn draft_row(draft: CreateApplicationPayload, now: DateTime<Utc>) -> Result<ApplicationRow> {
        let job_id = parse_reference("jobId", &draft.job_id)?;
        Ok(ApplicationRow {
            id: None,
            name: Some(draft.candidate_name.clone()),
            candidate_name: Some(draft.candidate_name),
            email: Some(draft.email),
            phone: draft.phone,
            cover_letter: draft.cover_letter,
            resume_url: draft.resume_url,
            status: Some(
                non_empty(draft.status).unwrap_or_else(|| DEFAULT_APPLICATION_STATUS.to_string()),
            ),
            submitted_date: Some(to_iso_string(now)),
            job_id: Some(job_id),
        })
    }
}

impl Patchable for Application {
    type Patch = UpdateApplicationPayload;

    fn patch_row(patch: UpdateApplicationPayload) -> Result<ApplicationRow> {
        let candidate_name = non_empty(patch.candidate_name);
        Ok(ApplicationRow {
            name: candidate_name.clone(),
            candidate_name,
            email: non_empty(patch.email),
            phone: non_empty(patch.phone),
            cover_letter: non_empty(patch.cover_letter),
            resume_url: non_empty(patch.resume_url),
            status: non_empty(patch.status),
            ..ApplicationRow::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn lookup_reference_becomes_text_id() {
        let row: ApplicationRow = serde_json::from_value(json!({
            "Id": 3,
            "candidate_name_c": "Ada",
            "job_id_c": { "Id": 17, "Name": "Compiler Engineer" }
        }))
        .unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let app = Application::from_row(row, now);

        assert_eq!(app.job_id, "17");
        assert_eq!(app.status, "submitted");
        assert_eq!(app.submitted_date, now);
        assert_eq!(app.email, "");
    }

    #[test]
    fn draft_row_flattens_job_reference() {
        let draft = CreateApplicationPayload {
            candidate_name: "A".into(),
            email: "a@x.com".into(),
            job_id: "5".into(),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let wire = serde_json::to_value(Application::draft_row(draft, now).unwrap()).unwrap();

        assert_eq!(wire["job_id_c"], json!(5));
        assert_eq!(wire["Name"], json!("A"));
        assert_eq!(wire["status_c"], json!("submitted"));
        assert_eq!(wire["submitted_date_c"], json!("2025-01-01T12:00:00.000Z"));
    }

    #[test]
    fn draft_row_rejects_unreadable_job_reference() {
        let draft = CreateApplicationPayload {
            candidate_name: "A".into(),
            email: "a@x.com".into(),
            job_id: "first".into(),
            ..Default::default()
        };
        assert!(Application::draft_row(draft, Utc::now()).is_err());
    }

    #[test]
    fn patch_row_only_sets_present_fields() {
        let patch = UpdateApplicationPayload {
            status: Some("reviewed".into()),
            phone: Some(String::new()),
            ..Default::default()
        };
        let wire = serde_json::to_value(Application::patch_row(patch).unwrap()).unwrap();
        assert_eq!(wire, json!({ "status_c": "reviewed" }));
    }
}
