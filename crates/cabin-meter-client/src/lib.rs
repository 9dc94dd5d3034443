//! Cabin Meter Client SDK.
//!
//! This crate provides a typed client for the cabin-meter HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use cabin_meter_client::CabinMeterClient;
//!
//! # async fn example() -> Result<(), cabin_meter_client::ClientError> {
//! let client = CabinMeterClient::new("http://localhost:8000")?;
//!
//! client.create_cabin("4").await?;
//!
//! // Pre-fill the next stay's initial reading
//! let reading = client.last_meter_reading("4").await?;
//! println!("Meter at {reading} kWh");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use cabin_meter_core::{
    Cabin, CabinNumber, CompleteUsage, NewUsage, Usage, UsageEdit, UsageId, UsageSummary,
};
pub use client::{CabinMeterClient, ClientOptions};
pub use error::ClientError;
pub use types::*;
