//! Roster error types with HTTP status code mapping.
//!
//! [`RosterError`] is the central error type. Each variant maps to a
//! numeric code and an HTTP status, and renders as a flat JSON body whose
//! `error` field carries the human-readable message.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{CollectionError, RecordCollection, RecordField};

/// JSON error response body.
///
/// ```json
/// { "error": "invalid record at index 0: name must be a non-empty string",
///   "code": 1002, "index": 0, "field": "name" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Numeric error code (see [`RosterError::error_code`]).
    pub code: u32,
    /// Offending element index, for record validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Offending field, for record validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<RecordField>,
    /// Always an empty collection on failed loads, absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<RecordCollection>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// Caller-supplied argument is structurally wrong.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A collection element failed field validation.
    #[error("invalid record at index {index}: {field} {reason}")]
    InvalidRecord {
        /// Position of the offending element.
        index: usize,
        /// Offending field.
        field: RecordField,
        /// Human-readable reason.
        reason: String,
    },

    /// Stored content is not valid JSON or not an array.
    #[error("malformed collection: {0}")]
    MalformedCollection(String),

    /// Reading or writing the backing file failed.
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing the collection failed.
    #[error("encoding failure: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RosterError {
    /// Maps a decoding failure of caller-supplied input.
    ///
    /// A non-array becomes [`RosterError::InvalidInput`].
    #[must_use]
    pub fn from_input(err: CollectionError) -> Self {
        match err {
            CollectionError::NotASequence { found } => {
                Self::InvalidInput(format!("records must be an array, found {found}"))
            }
            CollectionError::InvalidRecord {
                index,
                field,
                reason,
            } => Self::InvalidRecord {
                index,
                field,
                reason,
            },
        }
    }

    /// Maps a decoding failure of stored content.
    ///
    /// A non-array becomes [`RosterError::MalformedCollection`].
    #[must_use]
    pub fn from_stored(err: CollectionError) -> Self {
        match err {
            CollectionError::NotASequence { found } => {
                Self::MalformedCollection(format!("expected an array, found {found}"))
            }
            other => Self::from_input(other),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidInput(_) => 1001,
            Self::InvalidRecord { .. } => 1002,
            Self::Io { .. } => 3001,
            Self::MalformedCollection(_) => 3002,
            Self::Encode(_) => 3003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidRecord { .. } => StatusCode::BAD_REQUEST,
            Self::MalformedCollection(_) | Self::Io { .. } | Self::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Builds the JSON body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorResponse {
        let (index, field) = match self {
            Self::InvalidRecord { index, field, .. } => (Some(*index), Some(*field)),
            _ => (None, None),
        };
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            index,
            field,
            records: None,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = axum::Json(self.to_body()).into_response();
        *response.status_mut() = status;
        response
    }
}

/// A failed load of the stored collection.
///
/// Whatever the cause, a failed load is a server-side problem: it renders
/// as `500` with an empty `records` array alongside the error.
#[derive(Debug)]
pub struct LoadFailure(pub RosterError);

impl From<RosterError> for LoadFailure {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for LoadFailure {
    fn into_response(self) -> Response {
        let mut body = self.0.to_body();
        body.records = Some(RecordCollection::new());
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_array_input_is_invalid_input() {
        let err = RosterError::from_input(CollectionError::NotASequence { found: "object" });
        assert!(matches!(err, RosterError::InvalidInput(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn non_array_stored_is_malformed() {
        let err = RosterError::from_stored(CollectionError::NotASequence { found: "string" });
        assert!(matches!(err, RosterError::MalformedCollection(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), 3002);
    }

    #[test]
    fn invalid_record_body_names_index_and_field() {
        let err = RosterError::InvalidRecord {
            index: 0,
            field: RecordField::Name,
            reason: "must be a non-empty string".to_string(),
        };
        let body = err.to_body();
        assert_eq!(body.index, Some(0));
        assert_eq!(body.field, Some(RecordField::Name));
        assert!(body.error.contains("index 0"));
        assert!(body.records.is_none());
    }

    #[test]
    fn load_failure_is_always_500() {
        let err = RosterError::InvalidRecord {
            index: 2,
            field: RecordField::Age,
            reason: "must be non-negative".to_string(),
        };
        let response = LoadFailure(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
