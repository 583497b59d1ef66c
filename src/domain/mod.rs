//! Domain layer: record types, validation, the adult filter and events.
//!
//! Everything here is storage- and transport-agnostic. Validation lives on
//! the types themselves so that a [`RecordCollection`] in hand is always
//! valid.

pub mod adult_filter;
pub mod event_bus;
pub mod record_collection;
pub mod record_event;
pub mod user_record;

pub use adult_filter::{ADULT_AGE_THRESHOLD, FilterProgress, filter_adults, filter_adults_with};
pub use event_bus::EventBus;
pub use record_collection::{CollectionError, RecordCollection};
pub use record_event::{EventTopic, RecordEvent};
pub use user_record::{FieldViolation, RecordField, UserRecord};
