//! Record handlers: load, save and adult filtering.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AdultsResponse, LoadRecordsResponse, RecordsRequest, SaveRecordsResponse};
use crate::app_state::AppState;
use crate::domain::ADULT_AGE_THRESHOLD;
use crate::error::{ErrorResponse, LoadFailure, RosterError};
use crate::service::FilterOutcome;

/// `GET /records` — Load the stored collection.
///
/// # Errors
///
/// Returns [`LoadFailure`] (500, empty `records`) if the store cannot be
/// read or holds invalid data.
#[utoipa::path(
    get,
    path = "/records",
    tag = "Records",
    summary = "Load all records",
    description = "Returns the full stored collection in file order. The backing file is seeded with default records on first access.",
    responses(
        (status = 200, description = "Stored collection", body = LoadRecordsResponse),
        (status = 500, description = "Store unreadable or holds invalid data", body = ErrorResponse),
    )
)]
pub async fn load_records(
    State(state): State<AppState>,
) -> Result<Json<LoadRecordsResponse>, LoadFailure> {
    let records = state.record_service.load_records().await?;
    Ok(Json(LoadRecordsResponse {
        records,
        message: "records loaded successfully".to_string(),
    }))
}

/// `POST /records` — Replace the stored collection.
///
/// # Errors
///
/// Returns [`RosterError::InvalidInput`] or [`RosterError::InvalidRecord`]
/// (400) on bad input and a 500 error on I/O failure.
#[utoipa::path(
    post,
    path = "/records",
    tag = "Records",
    summary = "Save all records",
    description = "Validates every record and replaces the stored collection. Validation stops at the first invalid record and nothing is written.",
    request_body = RecordsRequest,
    responses(
        (status = 200, description = "Collection saved", body = SaveRecordsResponse),
        (status = 400, description = "Invalid body or record", body = ErrorResponse),
        (status = 500, description = "Write failed", body = ErrorResponse),
    )
)]
pub async fn save_records(
    State(state): State<AppState>,
    payload: Result<Json<RecordsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RosterError> {
    let raw = records_field(payload)?;
    let count = state.record_service.save_records(&raw).await?;
    Ok(Json(SaveRecordsResponse {
        message: "records saved successfully".to_string(),
        count,
    }))
}

/// `GET /records/adults` — Load the stored collection and keep the adults.
///
/// # Errors
///
/// Returns [`LoadFailure`] if the store cannot be loaded.
#[utoipa::path(
    get,
    path = "/records/adults",
    tag = "Records",
    summary = "List stored adults",
    description = "Loads the stored collection and returns the records whose age is above the threshold, in file order.",
    responses(
        (status = 200, description = "Adult records", body = AdultsResponse),
        (status = 500, description = "Store unreadable or holds invalid data", body = ErrorResponse),
    )
)]
pub async fn load_adults(
    State(state): State<AppState>,
) -> Result<Json<AdultsResponse>, LoadFailure> {
    let outcome = state.record_service.load_adults().await?;
    Ok(Json(adults_response(outcome)))
}

/// `POST /records/adults` — Filter a posted collection.
///
/// The store is not touched.
///
/// # Errors
///
/// Returns [`RosterError::InvalidInput`] or [`RosterError::InvalidRecord`]
/// (400) on bad input.
#[utoipa::path(
    post,
    path = "/records/adults",
    tag = "Records",
    summary = "Filter posted records",
    description = "Returns the adults of the posted collection without reading or writing the store.",
    request_body = RecordsRequest,
    responses(
        (status = 200, description = "Adult records", body = AdultsResponse),
        (status = 400, description = "Invalid body or record", body = ErrorResponse),
    )
)]
pub async fn filter_adults(
    State(state): State<AppState>,
    payload: Result<Json<RecordsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RosterError> {
    let raw = records_field(payload)?;
    let outcome = state.record_service.filter_adults_raw(&raw)?;
    Ok(Json(adults_response(outcome)))
}

/// Record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(load_records).post(save_records))
        .route("/records/adults", get(load_adults).post(filter_adults))
}

/// Extracts the raw `records` value from a request body.
fn records_field(
    payload: Result<Json<RecordsRequest>, JsonRejection>,
) -> Result<serde_json::Value, RosterError> {
    let Json(body) = payload.map_err(|rejection| RosterError::InvalidInput(rejection.body_text()))?;
    body.records
        .ok_or_else(|| RosterError::InvalidInput("body must contain a records array".to_string()))
}

fn adults_response(outcome: FilterOutcome) -> AdultsResponse {
    let matched = outcome.adults.len();
    AdultsResponse {
        records: outcome.adults,
        examined: outcome.examined,
        matched,
        threshold: ADULT_AGE_THRESHOLD,
        message: format!("{matched} of {} records are adults", outcome.examined),
    }
}
