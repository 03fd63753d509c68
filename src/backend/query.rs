use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Rows per page requested by every list operation.
pub const PAGE_LIMIT: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub field: FieldName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: Operator,
    #[serde(rename = "Values")]
    pub values: Vec<JsonValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

/// Query accepted by `fetchRecords` and, with only `fields` set, by
/// `getRecordById`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchQuery {
    pub fields: Vec<FieldSelector>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<WhereClause>,
    #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(rename = "pagingInfo", default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<PagingInfo>,
}

impl FetchQuery {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|name| FieldSelector {
                    field: FieldName {
                        name: name.to_string(),
                    },
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn equal_to(mut self, field: &str, value: impl Into<JsonValue>) -> Self {
        self.filters.push(WhereClause {
            field_name: field.to_string(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        });
        self
    }

    /// The backend honours a single sort key; a second call replaces the first.
    pub fn order_by(mut self, field: &str, sort_type: SortOrder) -> Self {
        self.order_by = vec![OrderBy {
            field_name: field.to_string(),
            sort_type,
        }];
        self
    }

    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.paging = Some(PagingInfo { limit, offset });
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBatch {
    pub records: Vec<JsonValue>,
}

impl RecordBatch {
    pub fn single(record: JsonValue) -> Self {
        Self {
            records: vec![record],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}
