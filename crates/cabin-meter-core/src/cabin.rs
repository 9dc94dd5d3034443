//! Cabin records.

use serde::{Deserialize, Serialize};

use crate::ids::CabinNumber;

/// A rental cabin with its own electricity meter.
///
/// Owns zero or more usage records; deleting a cabin deletes its usages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cabin {
    /// Unique cabin number.
    pub number: CabinNumber,
}

impl Cabin {
    /// Create a cabin record.
    #[must_use]
    pub fn new(number: CabinNumber) -> Self {
        Self { number }
    }
}
