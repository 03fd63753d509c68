use serde_json::Value as JsonValue;
use tracing::warn;

use crate::backend::query::FetchQuery;
use crate::backend::SharedStore;
use crate::dto::saved_job_dto::SaveJobPayload;
use crate::error::{Error, Result};
use crate::models::entity::Entity;
use crate::models::saved_job::SavedJob;
use crate::services::record_service::{Mutation, RecordService};
use crate::utils::ids::parse_reference;

/// Saved jobs are keyed by the job they point at rather than their own id.
///
/// Uniqueness per job is only checked before inserting, so two concurrent
/// saves of the same job can both insert. A hard guarantee needs a uniqueness
/// constraint on the backend table.
#[derive(Clone)]
pub struct SavedJobService {
    records: RecordService<SavedJob>,
}

impl SavedJobService {
    pub fn new(store: Option<SharedStore>) -> Self {
        Self {
            records: RecordService::new(store),
        }
    }

    pub async fn list(&self) -> Result<Vec<SavedJob>> {
        self.records.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<SavedJob> {
        self.records.get_by_id(id).await
    }

    /// Id of the saved-job record pointing at `job_id`, if any.
    pub async fn find_by_job(&self, job_id: i64) -> Result<Option<i64>> {
        let query = FetchQuery::new(&["Name", "job_id_c"])
            .equal_to("job_id_c", job_id)
            .page(1, 0);
        let response = self
            .records
            .store()?
            .fetch_records(SavedJob::TABLE, &query)
            .await?;
        if !response.success {
            return Err(Error::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Failed to look up saved job".to_string()),
            ));
        }

        Ok(response
            .data
            .unwrap_or_default()
            .first()
            .and_then(|row| row.get("Id"))
            .and_then(JsonValue::as_i64))
    }

    pub async fn is_saved(&self, job_id: i64) -> Result<bool> {
        Ok(self.find_by_job(job_id).await?.is_some())
    }

    /// Saves `payload.job_id` unless it is already saved. A failed lookup is
    /// treated as "not saved" and the insert goes ahead.
    pub async fn create(&self, payload: SaveJobPayload) -> Result<Mutation<SavedJob>> {
        self.records.store()?;
        let job_id = parse_reference("jobId", &payload.job_id)?;

        match self.find_by_job(job_id).await {
            Ok(Some(_)) => return Err(Error::AlreadyExists("Job already saved".to_string())),
            Ok(None) => {}
            Err(err) => warn!("Saved-job lookup for job {} failed: {}", job_id, err),
        }

        self.records.create(payload).await
    }

    /// Removes the saved-job record for `job_id`. Nothing is deleted when no
    /// record points at the job or the lookup is rejected.
    pub async fn delete(&self, job_id: i64) -> Result<Mutation<()>> {
        let saved_id = match self.find_by_job(job_id).await {
            Ok(Some(id)) => id,
            Ok(None) | Err(Error::Rejected(_)) => {
                return Err(Error::NotFound("Saved job not found".to_string()))
            }
            Err(err) => return Err(err),
        };
        self.records.delete(saved_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::response::{ListResponse, MutationResponse, RecordOutcome};
    use crate::backend::MockRecordStore;
    use serde_json::json;
    use std::sync::Arc;

    fn service(mock: MockRecordStore) -> SavedJobService {
        SavedJobService::new(Some(Arc::new(mock)))
    }

    #[tokio::test]
    async fn create_short_circuits_when_already_saved() {
        let mut mock = MockRecordStore::new();
        mock.expect_fetch_records()
            .withf(|_, query| query.paging.map(|p| p.limit) == Some(1) && query.filters.len() == 1)
            .returning(|_, _| Ok(ListResponse::ok(vec![json!({ "Id": 3, "job_id_c": 7 })])));
        mock.expect_create_records().never();

        let err = service(mock)
            .create(SaveJobPayload { job_id: "7".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(ref m) if m == "Job already saved"));
    }

    #[tokio::test]
    async fn create_proceeds_when_lookup_fails() {
        let mut mock = MockRecordStore::new();
        mock.expect_fetch_records()
            .returning(|_, _| Ok(ListResponse::rejected("timeout")));
        mock.expect_create_records().times(1).returning(|_, batch| {
            let mut row = batch.records[0].clone();
            row["Id"] = json!(10);
            Ok(MutationResponse::with_results(vec![RecordOutcome::succeeded(Some(row))]))
        });

        let saved = service(mock)
            .create(SaveJobPayload { job_id: "7".into() })
            .await
            .unwrap();
        assert_eq!(saved.record.id, 10);
        assert_eq!(saved.record.job_id, Some(7));
    }

    #[tokio::test]
    async fn delete_without_match_skips_backend_delete() {
        let mut mock = MockRecordStore::new();
        mock.expect_fetch_records()
            .returning(|_, _| Ok(ListResponse::ok(Vec::new())));
        mock.expect_delete_records().never();

        let err = service(mock).delete(7).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(ref m) if m == "Saved job not found"));
    }

    #[tokio::test]
    async fn delete_removes_the_matching_record_id() {
        let mut mock = MockRecordStore::new();
        mock.expect_fetch_records()
            .returning(|_, _| Ok(ListResponse::ok(vec![json!({ "Id": 31 })])));
        mock.expect_delete_records()
            .withf(|_, request| request.record_ids == vec![31])
            .returning(|_, _| {
                Ok(MutationResponse::with_results(vec![RecordOutcome::succeeded(None)]))
            });

        assert!(service(mock).delete(7).await.is_ok());
    }

    #[tokio::test]
    async fn missing_client_fails_before_lookup() {
        let saved_jobs = SavedJobService::new(None);
        let err = saved_jobs
            .create(SaveJobPayload { job_id: "7".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ClientUnavailable));
    }
}
