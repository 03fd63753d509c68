use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::error::Result;

/// User-facing messages for one write operation.
#[derive(Debug, Clone, Copy)]
pub struct ActionNotices {
    pub success: Option<&'static str>,
    pub failure: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Notices {
    pub create: ActionNotices,
    pub update: ActionNotices,
    pub delete: ActionNotices,
}

/// A record type persisted in one backend table.
///
/// `Row` carries backend field names and is used for reads and writes alike;
/// `Self` is the normalized, application-facing shape with every default
/// applied.
pub trait Entity: Serialize + Sized + Send + Sync + 'static {
    type Row: Serialize + DeserializeOwned + Default + Send + Sync;

    const TABLE: &'static str;
    /// Fields projected by reads.
    const FIELDS: &'static [&'static str];
    /// Field lists are ordered by, newest first.
    const DATE_FIELD: &'static str;
    /// Plural noun used in log lines, e.g. "jobs".
    const PLURAL: &'static str;
    const NOTICES: Notices;

    /// Applies read defaults. `now` stands in for missing timestamps.
    fn from_row(row: Self::Row, now: DateTime<Utc>) -> Self;

    fn id(&self) -> i64;

    fn sort_date(&self) -> DateTime<Utc>;
}

pub trait Creatable: Entity {
    type Draft: Validate + Send + Sync;

    /// Backend row for a new record; `now` stamps the date field.
    fn draft_row(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self::Row>;
}

pub trait Patchable: Entity {
    type Patch: Send + Sync;

    /// Sparse row holding only the fields the patch sets. Empty strings and
    /// zero counts are treated as unset.
    fn patch_row(patch: Self::Patch) -> Result<Self::Row>;
}
