use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Envelope returned by `fetchRecords`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<JsonValue>>,
}

/// Envelope returned by `getRecordById`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<JsonValue>,
}

/// Per-record result inside a mutating response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<JsonValue>,
}

/// Envelope returned by `createRecord`, `updateRecord` and `deleteRecord`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<RecordOutcome>>,
}

impl ListResponse {
    pub fn ok(data: Vec<JsonValue>) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl RecordResponse {
    pub fn ok(data: Option<JsonValue>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }
}

impl RecordOutcome {
    pub fn succeeded(data: Option<JsonValue>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl MutationResponse {
    pub fn with_results(results: Vec<RecordOutcome>) -> Self {
        Self {
            success: true,
            message: None,
            results: Some(results),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            results: None,
        }
    }
}
