//! Identifier types for cabins and usages.
//!
//! Cabins are keyed by a free-form number chosen by the operator ("1", "5a"),
//! usages by a store-assigned integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MeterError;

/// A cabin number.
///
/// Alphanumeric and unique. Leading and trailing whitespace is stripped on
/// construction; an empty result is rejected.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CabinNumber(String);

impl CabinNumber {
    /// Create a cabin number, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `MeterError::EmptyCabinNumber` if nothing is left after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, MeterError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MeterError::EmptyCabinNumber);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CabinNumber {
    type Err = MeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for CabinNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CabinNumber({})", self.0)
    }
}

impl fmt::Display for CabinNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CabinNumber {
    type Error = MeterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CabinNumber> for String {
    fn from(number: CabinNumber) -> Self {
        number.0
    }
}

impl AsRef<str> for CabinNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A usage record identifier, assigned by the store on insert.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageId(i64);

impl UsageId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for UsageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UsageId({})", self.0)
    }
}

impl fmt::Display for UsageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UsageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
