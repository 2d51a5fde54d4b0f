//! Caller-supplied product identity.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Serialize;

/// Unique, caller-supplied identifier of a [`Product`](crate::product::Product).
///
/// Doubles as the storage key. The zero value is the "not provided" sentinel
/// and is never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CatalogNumber(i32);

impl CatalogNumber {
    /// The "not provided" sentinel.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw catalog number.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Access the raw value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Whether this is a real key rather than the zero sentinel.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl From<i32> for CatalogNumber {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CatalogNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CatalogNumber {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
