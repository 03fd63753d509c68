use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::query::{DeleteRequest, FetchQuery, RecordBatch};
use super::response::{ListResponse, MutationResponse, RecordResponse};
use super::RecordStore;
use crate::config::ApperCredentials;
use crate::error::{Error, Result};

const PROJECT_HEADER: &str = "X-Apper-Project-Id";
const PUBLIC_KEY_HEADER: &str = "X-Apper-Public-Key";

/// JSON client for the hosted record store.
#[derive(Clone)]
pub struct ApperClient {
    client: Client,
    base_url: Url,
    project_id: String,
    public_key: String,
}

impl ApperClient {
    pub fn new(credentials: &ApperCredentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: credentials.base_url.clone(),
            project_id: credentials.project_id.clone(),
            public_key: credentials.public_key.clone(),
        })
    }

    /// `{base}/tables/{table}/records[/{extra}..]`
    fn records_url(&self, table: &str, extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::Config(format!("APPER_BASE_URL cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty().extend(["tables", table, "records"]);
            segments.extend(extra);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header(PROJECT_HEADER, &self.project_id)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Record store returned status {}: {}", status, body);
            return Err(Error::Rejected(rejection_message(status, &body)));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Prefers the backend's own `message` field over the raw body.
fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(JsonValue::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP error {}: {}", status, body))
}

#[async_trait]
impl RecordStore for ApperClient {
    async fn fetch_records(&self, table: &str, query: &FetchQuery) -> Result<ListResponse> {
        let url = self.records_url(table, &["query"])?;
        debug!("Fetching records from {}", url);
        self.send(self.client.post(url).json(query)).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &FetchQuery,
    ) -> Result<RecordResponse> {
        let id = id.to_string();
        let url = self.records_url(table, &[id.as_str(), "query"])?;
        debug!("Fetching record from {}", url);
        self.send(self.client.post(url).json(query)).await
    }

    async fn create_records(&self, table: &str, batch: &RecordBatch) -> Result<MutationResponse> {
        let url = self.records_url(table, &[])?;
        self.send(self.client.post(url).json(batch)).await
    }

    async fn update_records(&self, table: &str, batch: &RecordBatch) -> Result<MutationResponse> {
        let url = self.records_url(table, &[])?;
        self.send(self.client.put(url).json(batch)).await
    }

    async fn delete_records(
        &self,
        table: &str,
        request: &DeleteRequest,
    ) -> Result<MutationResponse> {
        let url = self.records_url(table, &[])?;
        self.send(self.client.delete(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApperClient {
        let credentials = ApperCredentials {
            base_url: Url::parse(base).unwrap(),
            project_id: "proj".into(),
            public_key: "key".into(),
        };
        ApperClient::new(&credentials, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn records_url_appends_table_segments() {
        let client = client("https://api.example.com/v1/");
        let url = client.records_url("job_c", &["12", "query"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/tables/job_c/records/12/query"
        );
    }

    #[test]
    fn records_url_without_trailing_slash() {
        let client = client("https://api.example.com/v1");
        let url = client.records_url("saved_job_c", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/tables/saved_job_c/records");
    }

    #[test]
    fn rejection_prefers_backend_message() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            rejection_message(status, r#"{"success":false,"message":"Invalid field"}"#),
            "Invalid field"
        );
        assert_eq!(
            rejection_message(status, "boom"),
            "HTTP error 400 Bad Request: boom"
        );
    }
}
