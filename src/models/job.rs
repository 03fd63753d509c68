use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::Result;
use crate::models::entity::{ActionNotices, Creatable, Entity, Notices, Patchable};
use crate::utils::lenient::{self, join_lines, non_empty, split_lines};
use crate::utils::time::{timestamp_or, to_iso_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        rename = "Name",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "title_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "company_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,
    #[serde(
        rename = "location_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        rename = "job_type_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_type: Option<String>,
    #[serde(
        rename = "experience_level_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience_level: Option<String>,
    #[serde(
        rename = "industry_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub industry: Option<String>,
    #[serde(
        rename = "salary_range_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary_range: Option<String>,
    #[serde(
        rename = "description_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        rename = "requirements_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub requirements: Option<String>,
    #[serde(
        rename = "benefits_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub benefits: Option<String>,
    #[serde(
        rename = "status_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        rename = "posted_date_c",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub posted_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "Id")]
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub industry: String,
    pub salary_range: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub status: String,
    pub posted_date: DateTime<Utc>,
}

pub const DEFAULT_JOB_STATUS: &str = "active";

impl Entity for Job {
    type Row = JobRow;

    const TABLE: &'static str = "job_c";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "title_c",
        "company_c",
        "location_c",
        "job_type_c",
        "experience_level_c",
        "industry_c",
        "salary_range_c",
        "description_c",
        "requirements_c",
        "benefits_c",
        "status_c",
        "posted_date_c",
    ];
    const DATE_FIELD: &'static str = "posted_date_c";
    const PLURAL: &'static str = "jobs";
    const NOTICES: Notices = Notices {
        create: ActionNotices {
            success: Some("Job posted successfully"),
            failure: "Failed to create job",
        },
        update: ActionNotices {
            success: Some("Job updated successfully"),
            failure: "Failed to update job",
        },
        delete: ActionNotices {
            success: Some("Job deleted successfully"),
            failure: "Failed to delete job",
        },
    };

    fn from_row(row: JobRow, now: DateTime<Utc>) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            company: row.company.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            job_type: row.job_type.unwrap_or_default(),
            experience_level: row.experience_level.unwrap_or_default(),
            industry: row.industry.unwrap_or_default(),
            salary_range: row.salary_range.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            requirements: split_lines(row.requirements.as_deref()),
            benefits: split_lines(row.benefits.as_deref()),
            status: non_empty(row.status).unwrap_or_else(|| DEFAULT_JOB_STATUS.to_string()),
            posted_date: timestamp_or(row.posted_date.as_deref(), now),
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_date(&self) -> DateTime<Utc> {
        self.posted_date
    }
}

impl Creatable for Job {
    type Draft = CreateJobPayload;

    fn draft_row(draft: CreateJobPayload, now: DateTime<Utc>) -> Result<JobRow> {
        Ok(JobRow {
            id: None,
            name: Some(draft.title.clone()),
            title: Some(draft.title),
            company: Some(draft.company),
            location: draft.location,
            job_type: draft.job_type,
            experience_level: draft.experience_level,
            industry: draft.industry,
            salary_range: draft.salary_range,
            description: draft.description,
            requirements: Some(join_lines(&draft.requirements)),
            benefits: Some(join_lines(&draft.benefits)),
            status: Some(non_empty(draft.status).unwrap_or_else(|| DEFAULT_JOB_STATUS.to_string())),
            posted_date: Some(to_iso_string(now)),
        })
    }
}

impl Patchable for Job {
    type Patch = UpdateJobPayload;

    fn patch_row(patch: UpdateJobPayload) -> Result<JobRow> {
        let title = non_empty(patch.title);
        Ok(JobRow {
            name: title.clone(),
            title,
            company: non_empty(patch.company),
            location: non_empty(patch.location),
            job_type: non_empty(patch.job_type),
            experience_level: non_empty(patch.experience_level),
            industry: non_empty(patch.industry),
            salary_range: non_empty(patch.salary_range),
            description: non_empty(patch.description),
            requirements: patch.requirements.map(|lines| join_lines(&lines)),
            benefits: patch.benefits.map(|lines| join_lines(&lines)),
            status: non_empty(patch.status),
            ..JobRow::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap()
    }

    #[test]
    fn sparse_row_gets_read_defaults() {
        let row: JobRow = serde_json::from_value(json!({
            "Id": 9,
            "title_c": "Backend Engineer",
            "requirements_c": "Rust\n\nPostgres\n",
            "status_c": ""
        }))
        .unwrap();

        let job = Job::from_row(row, fixed_now());
        assert_eq!(job.id, 9);
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.company, "");
        assert_eq!(job.requirements, vec!["Rust", "Postgres"]);
        assert!(job.benefits.is_empty());
        assert_eq!(job.status, "active");
        assert_eq!(job.posted_date, fixed_now());
    }

    #[test]
    fn draft_row_names_record_after_title_and_stamps_date() {
        let draft = CreateJobPayload {
            title: "Designer".into(),
            company: "Acme".into(),
            requirements: vec!["Figma".into(), "CSS".into()],
            ..Default::default()
        };
        let row = Job::draft_row(draft, fixed_now()).unwrap();
        let wire = serde_json::to_value(&row).unwrap();

        assert_eq!(wire["Name"], json!("Designer"));
        assert_eq!(wire["title_c"], json!("Designer"));
        assert_eq!(wire["requirements_c"], json!("Figma\nCSS"));
        assert_eq!(wire["status_c"], json!("active"));
        assert_eq!(wire["posted_date_c"], json!("2025-02-03T04:05:06.000Z"));
        assert!(wire.get("Id").is_none());
        assert!(wire.get("location_c").is_none());
    }

    #[test]
    fn patch_row_skips_falsy_fields() {
        let patch = UpdateJobPayload {
            title: Some(String::new()),
            company: Some("Globex".into()),
            benefits: Some(Vec::new()),
            ..Default::default()
        };
        let wire = serde_json::to_value(Job::patch_row(patch).unwrap()).unwrap();
        assert_eq!(
            wire,
            json!({ "company_c": "Globex", "benefits_c": "" })
        );
    }

    #[test]
    fn patched_title_renames_record() {
        let patch = UpdateJobPayload {
            title: Some("Staff Engineer".into()),
            ..Default::default()
        };
        let wire = serde_json::to_value(Job::patch_row(patch).unwrap()).unwrap();
        assert_eq!(wire, json!({ "Name": "Staff Engineer", "title_c": "Staff Engineer" }));
    }

    #[test]
    fn serializes_with_application_field_names() {
        let job = Job::from_row(JobRow { id: Some(1), ..Default::default() }, fixed_now());
        let wire = serde_json::to_value(&job).unwrap();
        assert_eq!(wire["Id"], json!(1));
        assert!(wire.get("jobType").is_some());
        assert!(wire.get("postedDate").is_some());
    }
}
