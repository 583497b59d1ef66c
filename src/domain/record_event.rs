//! Domain events describing store access and filter progress.
//!
//! Every load, save and filter step emits a [`RecordEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers so a
//! front end can render "checking X" progress as it happens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Topic an event belongs to. WebSocket clients subscribe per topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTopic {
    /// Per-record progress and completion of the adult filter.
    Filter,
    /// Loads and saves of the backing file.
    Store,
}

impl EventTopic {
    /// Parses a topic name. Returns `None` for unknown names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "filter" => Some(Self::Filter),
            "store" => Some(Self::Store),
            _ => None,
        }
    }
}

/// Domain event emitted by the record service.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RecordEvent {
    /// Emitted once per record examined by the adult filter.
    RecordChecked {
        /// Position of the record in the filtered collection.
        index: usize,
        /// Record name.
        name: String,
        /// Record age.
        age: u64,
        /// Whether the record passed the filter.
        adult: bool,
        /// Time of the check.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after the filter examined every record.
    FilterCompleted {
        /// Number of records examined.
        examined: usize,
        /// Number of adults selected.
        matched: usize,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after the collection was read from the store.
    CollectionLoaded {
        /// Number of records loaded.
        count: usize,
        /// Load timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after the collection was written to the store.
    CollectionSaved {
        /// Number of records written.
        count: usize,
        /// Save timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl RecordEvent {
    /// Returns the topic this event is published under.
    #[must_use]
    pub const fn topic(&self) -> EventTopic {
        match self {
            Self::RecordChecked { .. } | Self::FilterCompleted { .. } => EventTopic::Filter,
            Self::CollectionLoaded { .. } | Self::CollectionSaved { .. } => EventTopic::Store,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::RecordChecked { .. } => "record_checked",
            Self::FilterCompleted { .. } => "filter_completed",
            Self::CollectionLoaded { .. } => "collection_loaded",
            Self::CollectionSaved { .. } => "collection_saved",
        }
    }
}
