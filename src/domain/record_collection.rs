//! Ordered collection of validated user records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::user_record::{FieldViolation, RecordField, UserRecord, json_type_name};

/// Why an untrusted JSON value could not be decoded as a collection.
///
/// Callers decide what this means in their context: a non-array is a
/// malformed store on the load path but bad caller input on the save path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The value is not a JSON array.
    NotASequence {
        /// JSON type that was found instead.
        found: &'static str,
    },
    /// An element failed record validation. Only the first failure is
    /// reported.
    InvalidRecord {
        /// Position of the offending element.
        index: usize,
        /// Offending field.
        field: RecordField,
        /// Human-readable reason.
        reason: String,
    },
}

/// Ordered sequence of [`UserRecord`]s.
///
/// Order is insertion order from the backing file and survives a
/// save/load round-trip. Names are not unique; a record has no identity
/// beyond its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RecordCollection(Vec<UserRecord>);

impl RecordCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Decodes and validates a collection from an untrusted JSON value.
    ///
    /// Validation is fail-fast: decoding stops at the first invalid
    /// element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotASequence`] if `value` is not an
    /// array and [`CollectionError::InvalidRecord`] for the first element
    /// that fails validation.
    pub fn from_json(value: &Value) -> Result<Self, CollectionError> {
        let Some(items) = value.as_array() else {
            return Err(CollectionError::NotASequence {
                found: json_type_name(value),
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                UserRecord::from_json(item).map_err(|FieldViolation { field, reason }| {
                    CollectionError::InvalidRecord {
                        index,
                        field,
                        reason,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, UserRecord> {
        self.0.iter()
    }

    /// Returns the records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[UserRecord] {
        &self.0
    }

    /// Consumes the collection, returning the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<UserRecord> {
        self.0
    }
}

impl From<Vec<UserRecord>> for RecordCollection {
    fn from(records: Vec<UserRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<UserRecord> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = UserRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for RecordCollection {
    type Item = UserRecord;
    type IntoIter = std::vec::IntoIter<UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a UserRecord;
    type IntoIter = std::slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
