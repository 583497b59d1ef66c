//! # roster-gateway
//!
//! REST API and WebSocket gateway for a file-backed user roster.
//!
//! The roster is a single JSON file of `{ name, age }` records. The
//! gateway seeds it on first access, validates everything it reads or
//! writes, and selects the adults (`age > 18`) while streaming per-record
//! progress to WebSocket subscribers.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket, roster-cli)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── RecordService (service/)
//!     ├── EventBus + adult filter (domain/)
//!     │
//!     └── JsonFileStore (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
pub mod ws;
