//! Usage handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use cabin_meter_core::{
    CabinNumber, CompleteUsage, NewUsage, Usage, UsageEdit, UsageId, UsageQuery, UsageSummary,
};
use cabin_meter_store::Store;

use crate::error::ApiError;
use crate::handlers::DeletedResponse;
use crate::state::AppState;

/// Query parameters of the summary endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParams {
    /// Restrict the summary to one cabin.
    pub cabin_number: Option<String>,
}

fn usage_id(path: Result<Path<i64>, PathRejection>) -> Result<UsageId, ApiError> {
    let Path(id) = path?;
    Ok(UsageId::new(id))
}

/// List all usages, newest first.
pub async fn list_usages(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Usage>>, ApiError> {
    let usages = state.store.list_usages(&UsageQuery::all()).await?;
    Ok(Json(usages))
}

/// List the `limit` most recent usages.
pub async fn list_latest_usages(
    State(state): State<Arc<AppState>>,
    limit: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Usage>>, ApiError> {
    let Path(limit) = limit?;
    let query = UsageQuery::latest(limit)?;

    let usages = state.store.list_usages(&query).await?;

    Ok(Json(usages))
}

/// Aggregate consumption, cost and stay length.
pub async fn usage_summary(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SummaryParams>, QueryRejection>,
) -> Result<Json<UsageSummary>, ApiError> {
    let Query(params) = params?;

    let query = match params.cabin_number {
        Some(number) => UsageQuery::for_cabin(CabinNumber::new(number)?),
        None => UsageQuery::all(),
    };
    let usages = state.store.list_usages(&query).await?;

    Ok(Json(UsageSummary::from_usages(&usages)))
}

/// Record a new usage for an existing cabin.
pub async fn create_usage(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewUsage>, JsonRejection>,
) -> Result<Json<Usage>, ApiError> {
    let Json(body) = body?;
    let cabin = body.cabin_number.clone();

    let usage = state.store.create_usage(body).await.inspect_err(|e| {
        tracing::warn!(cabin = %cabin, error = %e, "Usage creation rejected");
    })?;

    tracing::info!(
        usage_id = %usage.id,
        cabin = %usage.cabin_number,
        completed = usage.is_completed,
        "Usage created"
    );

    Ok(Json(usage))
}

/// Get a usage by ID.
pub async fn get_usage(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Usage>, ApiError> {
    let id = usage_id(id)?;

    let usage = state
        .store
        .get_usage(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("usage not found: {id}")))?;

    Ok(Json(usage))
}

/// Record the final meter reading of a usage.
pub async fn complete_usage(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CompleteUsage>, JsonRejection>,
) -> Result<Json<Usage>, ApiError> {
    let id = usage_id(id)?;
    let Json(body) = body?;

    let usage = state.store.complete_usage(id, &body).await.inspect_err(|e| {
        tracing::warn!(usage_id = %id, error = %e, "Usage completion rejected");
    })?;

    tracing::info!(
        usage_id = %usage.id,
        kwh_used = ?usage.kwh_used,
        "Usage completed"
    );

    Ok(Json(usage))
}

/// Change any subset of an open usage's fields.
pub async fn edit_usage(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UsageEdit>, JsonRejection>,
) -> Result<Json<Usage>, ApiError> {
    let id = usage_id(id)?;
    let Json(body) = body?;

    let usage = state.store.edit_usage(id, &body).await.inspect_err(|e| {
        tracing::warn!(usage_id = %id, error = %e, "Usage edit rejected");
    })?;

    tracing::info!(usage_id = %usage.id, "Usage edited");

    Ok(Json(usage))
}

/// Delete a usage.
pub async fn delete_usage(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = usage_id(id)?;

    state.store.delete_usage(id).await?;

    tracing::info!(usage_id = %id, "Usage deleted");

    Ok(Json(DeletedResponse::new(format!("usage {id} deleted"))))
}
