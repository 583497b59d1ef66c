//! Record DTOs for load, save and filter operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{RecordCollection, UserRecord};

/// Request body for `POST /records` and `POST /records/adults`.
///
/// `records` is kept as raw JSON so that structural problems surface as
/// validation errors naming the offending index and field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordsRequest {
    /// Full collection to save or filter.
    #[serde(default)]
    #[schema(value_type = Vec<UserRecord>)]
    pub records: Option<serde_json::Value>,
}

/// Response body for `GET /records`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoadRecordsResponse {
    /// The stored collection, in file order.
    pub records: RecordCollection,
    /// Human-readable status message.
    pub message: String,
}

/// Response body for `POST /records`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveRecordsResponse {
    /// Human-readable status message.
    pub message: String,
    /// Number of records written.
    pub count: usize,
}

/// Response body for the adult filter endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdultsResponse {
    /// Records with an age above the threshold, in input order.
    pub records: RecordCollection,
    /// Number of records examined.
    pub examined: usize,
    /// Number of adults selected.
    pub matched: usize,
    /// Age a record must exceed to be selected.
    pub threshold: u64,
    /// Human-readable status message.
    pub message: String,
}
