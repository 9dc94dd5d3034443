//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, patch};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{cabins, health, usages};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Cabins
/// - `GET /api/cabins` - List cabins
/// - `POST /api/cabins` - Create cabin
/// - `GET /api/cabins/:number` - Get cabin
/// - `DELETE /api/cabins/:number` - Delete cabin and its usages
/// - `GET /api/cabins/:number/usages` - List the cabin's usages
/// - `GET /api/cabins/:number/last-meter-reading` - Latest meter value
///
/// ## Usages
/// - `GET /api/usages` - List usages
/// - `POST /api/usages` - Create usage
/// - `GET /api/usages/latest/:limit` - Most recent usages
/// - `GET /api/usages/summary` - Totals, optionally per cabin
/// - `GET /api/usages/:id` - Get usage
/// - `PUT /api/usages/:id` - Record final reading
/// - `PATCH /api/usages/:id/edit` - Edit an open usage
/// - `DELETE /api/usages/:id` - Delete usage
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        // Cabins
        .route(
            "/cabins",
            get(cabins::list_cabins).post(cabins::create_cabin),
        )
        .route(
            "/cabins/:number",
            get(cabins::get_cabin).delete(cabins::delete_cabin),
        )
        .route("/cabins/:number/usages", get(cabins::list_cabin_usages))
        .route(
            "/cabins/:number/last-meter-reading",
            get(cabins::last_meter_reading),
        )
        // Usages
        .route(
            "/usages",
            get(usages::list_usages).post(usages::create_usage),
        )
        .route("/usages/latest/:limit", get(usages::list_latest_usages))
        .route("/usages/summary", get(usages::usage_summary))
        .route(
            "/usages/:id",
            get(usages::get_usage)
                .put(usages::complete_usage)
                .delete(usages::delete_usage),
        )
        .route("/usages/:id/edit", patch(usages::edit_usage))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no limit)
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
