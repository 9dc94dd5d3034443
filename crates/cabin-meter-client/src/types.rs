//! Request and response types not shared with the core crate.

use serde::{Deserialize, Serialize};

/// Create cabin request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCabinRequest {
    /// Cabin number.
    pub number: String,
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedResponse {
    /// Whether the resource was deleted.
    pub deleted: bool,
    /// Server confirmation message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Service status ("ok").
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
