//! HTTP request handlers.

pub mod cabins;
pub mod health;
pub mod usages;

use serde::Serialize;

/// Confirmation returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Always `true`.
    pub deleted: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl DeletedResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            deleted: true,
            message: message.into(),
        }
    }
}
