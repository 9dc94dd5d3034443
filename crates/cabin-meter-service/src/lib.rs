//! Cabin Meter HTTP API Service.
//!
//! This crate provides the HTTP API for recording electricity meter readings
//! of rental cabins:
//!
//! - Cabin management
//! - Usage records (one per guest stay) with completion and partial edits
//! - Last meter reading lookup for pre-filling the next stay
//! - Consumption and cost summaries
//!
//! Errors are returned as `{"error": {"code", "message", "details"}}` bodies;
//! see [`ApiError`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Axum handlers are async even without awaits

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
