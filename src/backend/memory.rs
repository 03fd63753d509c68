use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use super::query::{DeleteRequest, FetchQuery, Operator, RecordBatch, SortOrder};
use super::response::{ListResponse, MutationResponse, RecordOutcome, RecordResponse};
use super::RecordStore;
use crate::error::Result;

type Row = Map<String, JsonValue>;

const ID_FIELD: &str = "Id";

#[derive(Default)]
struct Tables {
    last_id: i64,
    rows: HashMap<String, BTreeMap<i64, Row>>,
}

/// In-process record store with the hosted backend's query semantics:
/// projection, equality filters, one sort key, limit/offset paging and
/// backend-assigned ids. Ids are unique across all tables.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores `row` verbatim (apart from the assigned `Id`) and returns its id.
    pub fn insert_raw(&self, table: &str, row: JsonValue) -> i64 {
        let mut tables = self.tables();
        tables.last_id += 1;
        let id = tables.last_id;
        let mut row = match row {
            JsonValue::Object(map) => map,
            _ => Row::new(),
        };
        row.insert(ID_FIELD.to_string(), JsonValue::from(id));
        tables
            .rows
            .entry(table.to_string())
            .or_default()
            .insert(id, row);
        id
    }

    /// Full rows of `table` in id order.
    pub fn rows(&self, table: &str) -> Vec<JsonValue> {
        self.tables()
            .rows
            .get(table)
            .map(|rows| rows.values().cloned().map(JsonValue::Object).collect())
            .unwrap_or_default()
    }
}

fn reference_id(value: &JsonValue) -> Option<&JsonValue> {
    match value {
        JsonValue::Object(map) => map.get(ID_FIELD),
        other => Some(other),
    }
}

/// Equality as the backend applies it: lookups compare by their `Id`, and a
/// number equals its decimal string form.
fn values_equal(stored: &JsonValue, wanted: &JsonValue) -> bool {
    let Some(stored) = reference_id(stored) else {
        return false;
    };
    match (stored, wanted) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64() == b.as_f64(),
        (JsonValue::Number(n), JsonValue::String(s)) | (JsonValue::String(s), JsonValue::Number(n)) => {
            s.trim().parse::<f64>().ok() == n.as_f64()
        }
        (a, b) => a == b,
    }
}

fn compare_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    match (a, b) {
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        (None | Some(JsonValue::Null), None | Some(JsonValue::Null)) => Ordering::Equal,
        (None | Some(JsonValue::Null), _) => Ordering::Less,
        (_, None | Some(JsonValue::Null)) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn project(row: &Row, query: &FetchQuery) -> JsonValue {
    if query.fields.is_empty() {
        return JsonValue::Object(row.clone());
    }
    let mut projected = Row::new();
    if let Some(id) = row.get(ID_FIELD) {
        projected.insert(ID_FIELD.to_string(), id.clone());
    }
    for name in query.field_names() {
        if let Some(value) = row.get(name) {
            projected.insert(name.to_string(), value.clone());
        }
    }
    JsonValue::Object(projected)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch_records(&self, table: &str, query: &FetchQuery) -> Result<ListResponse> {
        let tables = self.tables();
        let Some(rows) = tables.rows.get(table) else {
            return Ok(ListResponse::ok(Vec::new()));
        };

        let mut matched: Vec<&Row> = rows
            .values()
            .filter(|row| {
                query.filters.iter().all(|clause| match clause.operator {
                    Operator::EqualTo => row
                        .get(&clause.field_name)
                        .map(|stored| clause.values.iter().any(|v| values_equal(stored, v)))
                        .unwrap_or(false),
                })
            })
            .collect();

        if let Some(order) = query.order_by.first() {
            matched.sort_by(|a, b| {
                let ordering =
                    compare_values(a.get(&order.field_name), b.get(&order.field_name));
                match order.sort_type {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let (offset, limit) = query
            .paging
            .map(|p| (p.offset as usize, p.limit as usize))
            .unwrap_or((0, usize::MAX));

        let data = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| project(row, query))
            .collect();

        Ok(ListResponse::ok(data))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &FetchQuery,
    ) -> Result<RecordResponse> {
        let tables = self.tables();
        let row = tables
            .rows
            .get(table)
            .and_then(|rows| rows.get(&id))
            .map(|row| project(row, query));
        Ok(RecordResponse::ok(row))
    }

    async fn create_records(&self, table: &str, batch: &RecordBatch) -> Result<MutationResponse> {
        let mut tables = self.tables();
        let mut results = Vec::with_capacity(batch.records.len());

        for record in &batch.records {
            let JsonValue::Object(fields) = record else {
                results.push(RecordOutcome::failed("Record must be an object"));
                continue;
            };
            tables.last_id += 1;
            let id = tables.last_id;

            let mut row = fields.clone();
            row.insert(ID_FIELD.to_string(), JsonValue::from(id));
            tables
                .rows
                .entry(table.to_string())
                .or_default()
                .insert(id, row.clone());
            results.push(RecordOutcome::succeeded(Some(JsonValue::Object(row))));
        }

        Ok(MutationResponse::with_results(results))
    }

    async fn update_records(&self, table: &str, batch: &RecordBatch) -> Result<MutationResponse> {
        let mut tables = self.tables();
        let rows = tables.rows.entry(table.to_string()).or_default();
        let mut results = Vec::with_capacity(batch.records.len());

        for record in &batch.records {
            let Some(id) = record.get(ID_FIELD).and_then(JsonValue::as_i64) else {
                results.push(RecordOutcome::failed("Record Id is required"));
                continue;
            };
            let Some(row) = rows.get_mut(&id) else {
                results.push(RecordOutcome::failed(format!("Record {} not found", id)));
                continue;
            };
            if let JsonValue::Object(fields) = record {
                for (key, value) in fields {
                    if key != ID_FIELD {
                        row.insert(key.clone(), value.clone());
                    }
                }
            }
            results.push(RecordOutcome::succeeded(Some(JsonValue::Object(row.clone()))));
        }

        Ok(MutationResponse::with_results(results))
    }

    async fn delete_records(
        &self,
        table: &str,
        request: &DeleteRequest,
    ) -> Result<MutationResponse> {
        let mut tables = self.tables();
        let rows = tables.rows.entry(table.to_string()).or_default();

        let results = request
            .record_ids
            .iter()
            .map(|id| match rows.remove(id) {
                Some(_) => RecordOutcome::succeeded(None),
                None => RecordOutcome::failed(format!("Record {} not found", id)),
            })
            .collect();

        Ok(MutationResponse::with_results(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_ids_and_fetch_projects_fields() {
        let store = MemoryRecordStore::new();
        let batch = RecordBatch {
            records: vec![
                json!({ "title_c": "A", "posted_date_c": "2024-01-01T00:00:00.000Z" }),
                json!({ "title_c": "B", "posted_date_c": "2024-03-01T00:00:00.000Z" }),
            ],
        };
        let created = store.create_records("job_c", &batch).await.unwrap();
        let ids: Vec<i64> = created
            .results
            .unwrap()
            .iter()
            .map(|r| r.data.as_ref().unwrap()["Id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let query = FetchQuery::new(&["title_c"]).order_by("posted_date_c", SortOrder::Desc);
        let listed = store.fetch_records("job_c", &query).await.unwrap();
        let data = listed.data.unwrap();
        assert_eq!(data, vec![json!({ "Id": 2, "title_c": "B" }), json!({ "Id": 1, "title_c": "A" })]);
    }

    #[tokio::test]
    async fn equality_filter_matches_nested_lookups_and_strings() {
        let store = MemoryRecordStore::new();
        store.insert_raw("application_c", json!({ "job_id_c": { "Id": 5, "Name": "Dev" } }));
        store.insert_raw("application_c", json!({ "job_id_c": 6 }));
        store.insert_raw("application_c", json!({ "job_id_c": "5" }));

        let query = FetchQuery::new(&["job_id_c"]).equal_to("job_id_c", 5);
        let listed = store.fetch_records("application_c", &query).await.unwrap();
        assert_eq!(listed.data.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn paging_limits_results() {
        let store = MemoryRecordStore::new();
        for n in 0..5 {
            store.insert_raw("saved_job_c", json!({ "job_id_c": n }));
        }
        let query = FetchQuery::new(&["job_id_c"]).page(2, 1);
        let listed = store.fetch_records("saved_job_c", &query).await.unwrap();
        let data = listed.data.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["job_id_c"], json!(1));
    }

    #[tokio::test]
    async fn update_merges_and_reports_missing_rows() {
        let store = MemoryRecordStore::new();
        let id = store.insert_raw("job_c", json!({ "title_c": "Old", "company_c": "Acme" }));

        let batch = RecordBatch {
            records: vec![json!({ "Id": id, "title_c": "New" }), json!({ "Id": 999 })],
        };
        let response = store.update_records("job_c", &batch).await.unwrap();
        let results = response.results.unwrap();
        assert!(results[0].success);
        assert_eq!(results[0].data.as_ref().unwrap()["company_c"], json!("Acme"));
        assert!(!results[1].success);
        assert_eq!(results[1].message.as_deref(), Some("Record 999 not found"));
    }

    #[tokio::test]
    async fn delete_reports_each_id() {
        let store = MemoryRecordStore::new();
        let id = store.insert_raw("job_c", json!({}));
        let response = store
            .delete_records("job_c", &DeleteRequest { record_ids: vec![id, id + 10] })
            .await
            .unwrap();
        let results = response.results.unwrap();
        assert!(results[0].success);
        assert!(!results[1].success);
        assert!(store.rows("job_c").is_empty());
    }

    #[tokio::test]
    async fn get_by_id_on_missing_row_has_no_data() {
        let store = MemoryRecordStore::new();
        let response = store
            .get_record_by_id("job_c", 3, &FetchQuery::new(&["title_c"]))
            .await
            .unwrap();
        assert!(response.success);
        assert!(response.data.is_none());
    }
}
