//! Validated user record.
//!
//! [`UserRecord`] can only be built through validation, either from typed
//! values via [`UserRecord::new`] or from untrusted JSON via
//! [`UserRecord::from_json`]. Holding a `UserRecord` therefore proves the
//! name is non-empty and the age is a non-negative whole number.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Part of a collection element that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// The element itself (e.g. it is not a JSON object).
    Record,
    /// The `name` field.
    Name,
    /// The `age` field.
    Age,
}

impl RecordField {
    /// Returns the JSON field name as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Name => "name",
            Self::Age => "age",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field constraint violation, without collection context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Offending field.
    pub field: RecordField,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldViolation {
    fn new(field: RecordField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// One user entry: a non-empty name and a non-negative integer age.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct UserRecord {
    /// Display name. Never empty.
    #[schema(example = "Ana", min_length = 1)]
    name: String,
    /// Age in whole years.
    #[schema(example = 22, minimum = 0)]
    age: u64,
}

impl UserRecord {
    /// Creates a record from typed values.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldViolation`] on [`RecordField::Name`] if `name` is
    /// empty.
    pub fn new(name: impl Into<String>, age: u64) -> Result<Self, FieldViolation> {
        let name = name.into();
        if name.is_empty() {
            return Err(FieldViolation::new(
                RecordField::Name,
                "must be a non-empty string",
            ));
        }
        Ok(Self { name, age })
    }

    /// Decodes and validates a record from an untrusted JSON value.
    ///
    /// Unknown fields are ignored. The name is checked before the age, so
    /// an element failing both reports the name.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldViolation`] naming the first field that fails.
    pub fn from_json(value: &Value) -> Result<Self, FieldViolation> {
        let Some(object) = value.as_object() else {
            return Err(FieldViolation::new(
                RecordField::Record,
                format!("must be an object, found {}", json_type_name(value)),
            ));
        };

        let name = match object.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            Some(Value::String(_)) => {
                return Err(FieldViolation::new(
                    RecordField::Name,
                    "must be a non-empty string",
                ));
            }
            Some(other) => {
                return Err(FieldViolation::new(
                    RecordField::Name,
                    format!("must be a string, found {}", json_type_name(other)),
                ));
            }
            None => return Err(FieldViolation::new(RecordField::Name, "is missing")),
        };

        let age = match object.get("age") {
            Some(Value::Number(number)) => parse_age(number)?,
            Some(other) => {
                return Err(FieldViolation::new(
                    RecordField::Age,
                    format!("must be a number, found {}", json_type_name(other)),
                ));
            }
            None => return Err(FieldViolation::new(RecordField::Age, "is missing")),
        };

        Ok(Self { name, age })
    }

    /// Returns the record's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the record's age.
    #[must_use]
    pub const fn age(&self) -> u64 {
        self.age
    }
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .map_err(|v| serde::de::Error::custom(format!("{} {}", v.field, v.reason)))
    }
}

/// First float that no longer fits a `u64` (2^64).
const AGE_FLOAT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Accepts any non-negative whole number, including integer-valued floats
/// such as `22.0`.
fn parse_age(number: &serde_json::Number) -> Result<u64, FieldViolation> {
    if let Some(age) = number.as_u64() {
        return Ok(age);
    }
    if number.as_i64().is_some_and(|n| n < 0) {
        return Err(FieldViolation::new(RecordField::Age, "must be non-negative"));
    }
    let Some(age) = number.as_f64() else {
        return Err(FieldViolation::new(
            RecordField::Age,
            format!("must be a whole number, found {number}"),
        ));
    };
    if age < 0.0 {
        return Err(FieldViolation::new(RecordField::Age, "must be non-negative"));
    }
    if !age.is_finite() || age.fract() != 0.0 {
        return Err(FieldViolation::new(
            RecordField::Age,
            format!("must be a whole number, found {number}"),
        ));
    }
    if age >= AGE_FLOAT_LIMIT {
        return Err(FieldViolation::new(
            RecordField::Age,
            format!("{number} is out of range"),
        ));
    }
    Ok(age as u64)
}

/// Returns a short name for the JSON type of `value`, for error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
