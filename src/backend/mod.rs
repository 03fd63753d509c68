//! Generic record-storage backend: the query and envelope shapes, the
//! `RecordStore` seam the services depend on, and its two implementations.

pub mod apper;
pub mod memory;
pub mod query;
pub mod response;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, StoreKind};
use crate::error::Result;
use query::{DeleteRequest, FetchQuery, RecordBatch};
use response::{ListResponse, MutationResponse, RecordResponse};

/// Handle to the hosted record store. Tables are addressed by name and rows
/// travel as JSON objects keyed by backend field names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_records(&self, table: &str, query: &FetchQuery) -> Result<ListResponse>;

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &FetchQuery,
    ) -> Result<RecordResponse>;

    async fn create_records(&self, table: &str, batch: &RecordBatch) -> Result<MutationResponse>;

    async fn update_records(&self, table: &str, batch: &RecordBatch) -> Result<MutationResponse>;

    async fn delete_records(
        &self,
        table: &str,
        request: &DeleteRequest,
    ) -> Result<MutationResponse>;
}

pub type SharedStore = Arc<dyn RecordStore>;

/// Builds the store selected by configuration. `None` means no client could be
/// set up; services then degrade instead of failing startup.
pub fn store_from_config(config: &Config) -> Result<Option<SharedStore>> {
    match config.record_store {
        StoreKind::Memory => {
            tracing::info!("Using in-memory record store");
            Ok(Some(Arc::new(memory::MemoryRecordStore::new())))
        }
        StoreKind::Apper => match &config.apper {
            Some(credentials) => {
                let client = apper::ApperClient::new(
                    credentials,
                    Duration::from_secs(config.backend_timeout_secs),
                )?;
                tracing::info!("Record store client enabled, base URL: {}", credentials.base_url);
                Ok(Some(Arc::new(client)))
            }
            None => {
                tracing::warn!(
                    "Record store client disabled (APPER_BASE_URL, APPER_PROJECT_ID or APPER_PUBLIC_KEY not set)"
                );
                Ok(None)
            }
        },
    }
}
