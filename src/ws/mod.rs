//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams record events (filter
//! progress, loads, saves) to subscribed clients and accepts a small set
//! of commands.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
