//! Core types and domain rules for cabin meter tracking.
//!
//! This crate provides the foundational types used throughout the cabin meter backend:
//!
//! - **Identifiers**: `CabinNumber`, `UsageId`
//! - **Cabins**: `Cabin`
//! - **Usage**: `Usage`, `NewUsage`, `CompleteUsage`, `UsageEdit`, `UsageQuery`
//! - **Statistics**: `UsageSummary`
//! - **Energy math**: `compute_kwh_used`, `compute_stay_days`
//!
//! # Usage lifecycle
//!
//! A usage is created either *open* (no final reading yet) or *completed*
//! (final reading supplied up front). An open usage becomes completed through
//! [`Usage::complete`]. Once completed, field edits are rejected and only
//! deletion remains possible.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cabin;
pub mod energy;
pub mod error;
pub mod ids;
pub mod summary;
pub mod usage;

pub use cabin::Cabin;
pub use energy::{compute_kwh_used, compute_stay_days, stay_days_between, DATE_FORMAT};
pub use error::{ErrorKind, MeterError, Result};
pub use ids::{CabinNumber, UsageId};
pub use summary::UsageSummary;
pub use usage::{CompleteUsage, NewUsage, Usage, UsageEdit, UsageQuery};
