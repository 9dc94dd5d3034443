//! Application state.

use std::sync::Arc;

use cabin_meter_store::SqliteStore;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
///
/// The store handle is injected here once; each request borrows it and every
/// store operation acquires and releases its own pooled connection.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<SqliteStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<SqliteStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}
