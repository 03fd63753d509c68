use chrono::Utc;
use serde_json::Value as JsonValue;
use std::marker::PhantomData;
use tracing::{debug, warn};
use validator::Validate;

use crate::backend::query::{DeleteRequest, FetchQuery, RecordBatch, SortOrder, PAGE_LIMIT};
use crate::backend::response::MutationResponse;
use crate::backend::{RecordStore, SharedStore};
use crate::error::{Error, Result};
use crate::models::entity::{Creatable, Entity, Patchable};

/// Result of a write that reached the backend: the first record it accepted
/// plus the message of every record it refused.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub record: T,
    pub failures: Vec<String>,
}

impl<T> Mutation<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mutation<U> {
        Mutation {
            record: f(self.record),
            failures: self.failures,
        }
    }
}

/// List / get / create / update / delete for one entity table.
pub struct RecordService<E> {
    store: Option<SharedStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RecordService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> RecordService<E> {
    pub fn new(store: Option<SharedStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> Result<&dyn RecordStore> {
        self.store.as_deref().ok_or(Error::ClientUnavailable)
    }

    fn list_query() -> FetchQuery {
        FetchQuery::new(E::FIELDS)
            .order_by(E::DATE_FIELD, SortOrder::Desc)
            .page(PAGE_LIMIT, 0)
    }

    pub async fn list(&self) -> Result<Vec<E>> {
        self.fetch(Self::list_query()).await
    }

    /// Records whose `field` equals `value`, newest first.
    pub async fn list_where(&self, field: &str, value: impl Into<JsonValue>) -> Result<Vec<E>> {
        self.fetch(Self::list_query().equal_to(field, value)).await
    }

    pub(crate) async fn fetch(&self, query: FetchQuery) -> Result<Vec<E>> {
        let response = self.store()?.fetch_records(E::TABLE, &query).await?;
        if !response.success {
            return Err(rejection(response.message, || {
                format!("Failed to fetch {}", E::PLURAL)
            }));
        }

        let now = Utc::now();
        let mut items = Vec::new();
        for value in response.data.unwrap_or_default() {
            match decode::<E>(value, now) {
                Ok(item) => items.push(item),
                Err(err) => warn!("Skipping unreadable row in {}: {}", E::TABLE, err),
            }
        }

        // Stable, so equal dates keep the backend's order.
        items.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));
        debug!("Fetched {} {} from {}", items.len(), E::PLURAL, E::TABLE);
        Ok(items)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<E> {
        let query = FetchQuery::new(E::FIELDS);
        let response = self.store()?.get_record_by_id(E::TABLE, id, &query).await?;
        if !response.success {
            return Err(rejection(response.message, || {
                format!("Failed to fetch record {} from {}", id, E::TABLE)
            }));
        }

        match response.data {
            Some(value) if !value.is_null() => decode::<E>(value, Utc::now()),
            _ => Err(Error::NotFound(format!("Record {} not found in {}", id, E::TABLE))),
        }
    }

    pub async fn create(&self, draft: E::Draft) -> Result<Mutation<E>>
    where
        E: Creatable,
    {
        let store = self.store()?;
        draft.validate()?;
        let row = E::draft_row(draft, Utc::now())?;
        let batch = RecordBatch::single(serde_json::to_value(row)?);

        let response = store.create_records(E::TABLE, &batch).await?;
        self.accepted_record(response, "create")
    }

    /// Writes only the fields the patch sets; the rest keep their stored value.
    pub async fn update(&self, id: i64, patch: E::Patch) -> Result<Mutation<E>>
    where
        E: Patchable,
    {
        let store = self.store()?;
        let mut record = serde_json::to_value(E::patch_row(patch)?)?;
        if let JsonValue::Object(fields) = &mut record {
            fields.insert("Id".to_string(), JsonValue::from(id));
        }

        let response = store
            .update_records(E::TABLE, &RecordBatch::single(record))
            .await?;
        self.accepted_record(response, "update")
    }

    pub async fn delete(&self, id: i64) -> Result<Mutation<()>> {
        let request = DeleteRequest {
            record_ids: vec![id],
        };
        let response = self.store()?.delete_records(E::TABLE, &request).await?;
        Ok(settle::<E>(response, "delete")?.map(|_| ()))
    }

    fn accepted_record(&self, response: MutationResponse, action: &str) -> Result<Mutation<E>> {
        let mutation = settle::<E>(response, action)?;
        let failures = mutation.failures;
        let value = mutation.record.ok_or_else(|| {
            Error::Internal(format!(
                "Backend accepted the {} on {} without returning the record",
                action,
                E::TABLE
            ))
        })?;
        let record = decode::<E>(value, Utc::now())?;
        debug!("{}d record {} in {}", action, record.id(), E::TABLE);
        Ok(Mutation { record, failures })
    }
}

fn rejection(message: Option<String>, fallback: impl FnOnce() -> String) -> Error {
    Error::Rejected(message.filter(|m| !m.is_empty()).unwrap_or_else(fallback))
}

fn decode<E: Entity>(value: JsonValue, now: chrono::DateTime<Utc>) -> Result<E> {
    let row: E::Row = serde_json::from_value(value)?;
    Ok(E::from_row(row, now))
}

/// Splits per-record outcomes. At least one success yields its data (if any)
/// alongside every failure message; none at all is `BatchFailed`.
fn settle<E: Entity>(
    response: MutationResponse,
    action: &str,
) -> Result<Mutation<Option<JsonValue>>> {
    if !response.success {
        return Err(rejection(response.message, || {
            format!("Failed to {} {}", action, E::PLURAL)
        }));
    }

    let results = response.results.unwrap_or_default();
    let (succeeded, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(|r| r.success);

    if !failed.is_empty() {
        warn!(
            "Failed to {} {} {}: {}",
            action,
            failed.len(),
            E::PLURAL,
            serde_json::to_string(&failed).unwrap_or_default()
        );
    }
    let failures: Vec<String> = failed.into_iter().filter_map(|r| r.message).collect();

    match succeeded.into_iter().next() {
        Some(first) => Ok(Mutation {
            record: first.data,
            failures,
        }),
        None => Err(Error::BatchFailed(failures)),
    }
}
