//! Numeric-role classification

use serde::{Deserialize, Serialize};

/// Role of a number appearing in a query.
///
/// Auxiliary classification consumed only by the request translator; it
/// is not part of the public entity shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberRole {
    /// Desired result cardinality
    Count,
    /// Minimum-age filter value
    AgeThreshold,
}

impl NumberRole {
    /// Classify a numeric value by magnitude.
    ///
    /// Values inside the plausible-age band 20..=120 are age thresholds;
    /// everything outside it is a result count. The boundaries are
    /// inclusive on the age side: 20 and 120 are age thresholds, 19 and
    /// 121 are counts.
    pub fn of(value: i64) -> Self {
        if (20..=120).contains(&value) {
            Self::AgeThreshold
        } else {
            Self::Count
        }
    }
}

/// A number found in the query, with its derived role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericMention {
    /// Parsed numeric value
    pub value: i64,
    /// Derived role, exclusive and deterministic per mention
    pub role: NumberRole,
    /// Start byte offset of the source token
    pub start: usize,
}

impl NumericMention {
    /// Create a mention, deriving the role from the value
    pub fn new(value: i64, start: usize) -> Self {
        Self {
            value,
            role: NumberRole::of(value),
            start,
        }
    }
}
