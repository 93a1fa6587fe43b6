//! Strongly-typed identifiers used across the domain.

use core::num::ParseIntError;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier of a product.
///
/// Caller-supplied. The type admits any `i32`, including zero and negatives, so
/// that the inventory manager can reject them as a business rule rather than
/// the parser refusing them up front.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Self)
    }
}
