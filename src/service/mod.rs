//! Service layer: business logic orchestration.
//!
//! [`RecordService`] coordinates the record store and the adult filter,
//! and emits events through the [`super::domain::EventBus`].

pub mod record_service;

pub use record_service::{FilterOutcome, RecordService};
