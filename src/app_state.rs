//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::persistence::JsonFileStore;
use crate::service::RecordService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record service for all business logic.
    pub record_service: Arc<RecordService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires a store and a fresh event bus into application state.
    #[must_use]
    pub fn new(store: JsonFileStore, event_bus_capacity: usize) -> Self {
        let event_bus = EventBus::new(event_bus_capacity);
        let record_service = Arc::new(RecordService::new(store, event_bus.clone()));
        Self {
            record_service,
            event_bus,
        }
    }
}
