//! Record service: orchestrates store access and filtering, emits events.

use chrono::Utc;
use serde_json::Value;

use crate::domain::{EventBus, RecordCollection, RecordEvent, filter_adults_with};
use crate::error::RosterError;
use crate::persistence::JsonFileStore;

/// Orchestration layer for all record operations.
///
/// Owns the [`JsonFileStore`] for state and the [`EventBus`] for event
/// emission. Every operation follows the pattern: validate → call store
/// or filter → emit events → return result.
#[derive(Debug, Clone)]
pub struct RecordService {
    store: JsonFileStore,
    event_bus: EventBus,
}

/// Result of running the adult filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// The adult records, in input order.
    pub adults: RecordCollection,
    /// Number of records examined.
    pub examined: usize,
}

impl RecordService {
    /// Creates a new `RecordService`.
    #[must_use]
    pub fn new(store: JsonFileStore, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`JsonFileStore`].
    #[must_use]
    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    /// Loads the full collection, seeding the store on first access.
    ///
    /// # Errors
    ///
    /// Propagates [`JsonFileStore::load`] failures.
    pub async fn load_records(&self) -> Result<RecordCollection, RosterError> {
        let records = self.store.load().await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to load records");
        })?;

        let _ = self.event_bus.publish(RecordEvent::CollectionLoaded {
            count: records.len(),
            timestamp: Utc::now(),
        });

        tracing::info!(count = records.len(), "records loaded");
        Ok(records)
    }

    /// Validates caller-supplied JSON and replaces the stored collection.
    ///
    /// Validation is fail-fast; nothing is written unless every element
    /// is valid. Returns the number of records written.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InvalidInput`] if `raw` is not an array.
    /// - [`RosterError::InvalidRecord`] for the first invalid element.
    /// - Store failures from [`JsonFileStore::save`].
    pub async fn save_records(&self, raw: &Value) -> Result<usize, RosterError> {
        let records = RecordCollection::from_json(raw).map_err(RosterError::from_input)?;
        let count = self.store.save(&records).await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to save records");
        })?;

        let _ = self.event_bus.publish(RecordEvent::CollectionSaved {
            count,
            timestamp: Utc::now(),
        });

        tracing::info!(count, "records saved");
        Ok(count)
    }

    /// Runs the adult filter over `records`, publishing one
    /// `record_checked` event per record and a final `filter_completed`.
    #[must_use]
    pub fn filter_adults(&self, records: &RecordCollection) -> FilterOutcome {
        let adults = filter_adults_with(records, |step| {
            tracing::debug!(
                index = step.index,
                name = step.record.name(),
                age = step.record.age(),
                adult = step.adult,
                "checking record"
            );
            let _ = self.event_bus.publish(RecordEvent::RecordChecked {
                index: step.index,
                name: step.record.name().to_string(),
                age: step.record.age(),
                adult: step.adult,
                timestamp: Utc::now(),
            });
        });

        let _ = self.event_bus.publish(RecordEvent::FilterCompleted {
            examined: records.len(),
            matched: adults.len(),
            timestamp: Utc::now(),
        });

        tracing::debug!(examined = records.len(), matched = adults.len(), "filter completed");
        FilterOutcome {
            adults,
            examined: records.len(),
        }
    }

    /// Validates caller-supplied JSON and filters it without touching the
    /// store.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InvalidInput`] if `raw` is not an array.
    /// - [`RosterError::InvalidRecord`] for the first invalid element.
    pub fn filter_adults_raw(&self, raw: &Value) -> Result<FilterOutcome, RosterError> {
        let records = RecordCollection::from_json(raw).map_err(RosterError::from_input)?;
        Ok(self.filter_adults(&records))
    }

    /// Loads the stored collection and filters it.
    ///
    /// # Errors
    ///
    /// Propagates [`RecordService::load_records`] failures.
    pub async fn load_adults(&self) -> Result<FilterOutcome, RosterError> {
        let records = self.load_records().await?;
        Ok(self.filter_adults(&records))
    }
}
