//! Cabin handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use cabin_meter_core::{Cabin, CabinNumber, Usage, UsageQuery};
use cabin_meter_store::Store;

use crate::error::ApiError;
use crate::handlers::DeletedResponse;
use crate::state::AppState;

/// Create cabin request.
#[derive(Debug, Deserialize)]
pub struct CreateCabinRequest {
    /// Cabin number; surrounding whitespace is dropped.
    pub number: String,
}

fn cabin_number(path: Result<Path<String>, PathRejection>) -> Result<CabinNumber, ApiError> {
    let Path(number) = path?;
    Ok(CabinNumber::new(number)?)
}

/// List all cabins ordered by number.
pub async fn list_cabins(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Cabin>>, ApiError> {
    let cabins = state.store.list_cabins().await?;
    Ok(Json(cabins))
}

/// Create a new cabin.
pub async fn create_cabin(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateCabinRequest>, JsonRejection>,
) -> Result<Json<Cabin>, ApiError> {
    let Json(body) = body?;
    let number = CabinNumber::new(&body.number)?;

    let cabin = state.store.create_cabin(&number).await.inspect_err(|e| {
        tracing::warn!(cabin = %number, error = %e, "Cabin creation rejected");
    })?;

    tracing::info!(cabin = %cabin.number, "Cabin created");

    Ok(Json(cabin))
}

/// Get a cabin by number.
pub async fn get_cabin(
    State(state): State<Arc<AppState>>,
    number: Result<Path<String>, PathRejection>,
) -> Result<Json<Cabin>, ApiError> {
    let number = cabin_number(number)?;

    let cabin = state
        .store
        .get_cabin(&number)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("cabin not found: {number}")))?;

    Ok(Json(cabin))
}

/// Delete a cabin and every usage recorded for it.
pub async fn delete_cabin(
    State(state): State<Arc<AppState>>,
    number: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let number = cabin_number(number)?;

    let usages = state.store.delete_cabin(&number).await?;

    tracing::info!(cabin = %number, usages, "Cabin deleted");

    Ok(Json(DeletedResponse::new(format!(
        "cabin {number} and {usages} related usage(s) deleted"
    ))))
}

/// List the usages of one cabin, newest first.
pub async fn list_cabin_usages(
    State(state): State<Arc<AppState>>,
    number: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Usage>>, ApiError> {
    let number = cabin_number(number)?;

    let usages = state
        .store
        .list_usages(&UsageQuery::for_cabin(number))
        .await?;

    Ok(Json(usages))
}

/// Latest known meter value of a cabin.
pub async fn last_meter_reading(
    State(state): State<Arc<AppState>>,
    number: Result<Path<String>, PathRejection>,
) -> Result<Json<f64>, ApiError> {
    let number = cabin_number(number)?;

    let reading = state.store.last_meter_reading(&number).await?;

    tracing::debug!(cabin = %number, reading, "Last meter reading resolved");

    Ok(Json(reading))
}
