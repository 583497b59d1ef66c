//! HTTP server assembly: router, middleware and the serve loop.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::RosterConfig;
use crate::persistence::JsonFileStore;
use crate::ws::handler::ws_handler;

/// Builds the full application router: REST endpoints, the `/ws`
/// endpoint, and the tracing, CORS and timeout middleware.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

/// Builds application state from `config`.
#[must_use]
pub fn build_state(config: &RosterConfig) -> AppState {
    AppState::new(
        JsonFileStore::new(config.data_file.clone()),
        config.event_bus_capacity,
    )
}

/// Serves `app` on an already-bound listener until the process stops.
///
/// # Errors
///
/// Returns an I/O error if the server fails.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "server listening");
    }
    axum::serve(listener, app).await
}
