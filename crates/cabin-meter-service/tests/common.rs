//! Common test utilities for cabin-meter integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use cabin_meter_service::{create_router, AppState, ServiceConfig};
use cabin_meter_store::SqliteStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct store handle for checking persisted state.
    pub store: Arc<SqliteStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh, unseeded database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let database_path = temp_dir.path().join("test.db");
        let store = SqliteStore::open(&database_path)
            .await
            .expect("Failed to open store");
        let store = Arc::new(store);

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_path: database_path.to_string_lossy().to_string(),
            seed_sample_data: false,
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Create a cabin, asserting success.
    pub async fn create_cabin(&self, number: &str) {
        self.server
            .post("/api/cabins")
            .json(&json!({ "number": number }))
            .await
            .assert_status_ok();
    }

    /// Create a usage from `body`, asserting success, and return the response.
    pub async fn create_usage(&self, body: Value) -> Value {
        let response = self.server.post("/api/usages").json(&body).await;
        response.assert_status_ok();
        response.json()
    }
}

/// A usage request body for `cabin` with the given readings.
pub fn usage_body(cabin: &str, initial: f64, final_reading: Option<f64>, date: &str) -> Value {
    let mut body = json!({
        "cabinNumber": cabin,
        "userName": "Jan Kowalski",
        "initialReading": initial,
        "costPerKwh": 0.75,
        "date": date,
        "startDate": "2025-02-25",
        "endDate": "2025-03-01",
    });
    if let Some(reading) = final_reading {
        body["finalReading"] = json!(reading);
    }
    body
}

/// The `error.code` of an error response body.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
