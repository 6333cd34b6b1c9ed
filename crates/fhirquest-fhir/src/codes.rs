//! Static condition-code table (SNOMED CT)

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// SNOMED CT coding system URI
pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";

/// One row of the condition-code table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionCode {
    /// Canonical query keyword
    pub keyword: &'static str,
    /// Coding system URI
    pub system: &'static str,
    /// SNOMED CT code
    pub code: &'static str,
    /// Display string for the coding
    pub display: &'static str,
}

/// Canonical keyword rows, initialized once per process and never mutated
static CONDITION_CODES: Lazy<HashMap<&'static str, ConditionCode>> = Lazy::new(|| {
    let rows = [
        ConditionCode {
            keyword: "diabetic",
            system: SNOMED_SYSTEM,
            code: "73211009",
            display: "Diabetes mellitus",
        },
        ConditionCode {
            keyword: "hypertensive",
            system: SNOMED_SYSTEM,
            code: "38341003",
            display: "Hypertensive disorder",
        },
        ConditionCode {
            keyword: "asthmatic",
            system: SNOMED_SYSTEM,
            code: "195967001",
            display: "Asthma",
        },
        ConditionCode {
            keyword: "cardiac",
            system: SNOMED_SYSTEM,
            code: "56265001",
            display: "Heart disease",
        },
    ];
    rows.into_iter().map(|row| (row.keyword, row)).collect()
});

/// Base-condition synonyms folded onto canonical keywords
static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("diabetes", "diabetic"),
        ("hypertension", "hypertensive"),
        ("asthma", "asthmatic"),
    ])
});

/// Look up the code row for a condition keyword.
///
/// Accepts canonical keywords and their base-condition synonyms; returns
/// `None` for anything else, which callers handle by silent omission.
pub fn condition_code(keyword: &str) -> Option<&'static ConditionCode> {
    let lower = keyword.to_lowercase();
    let canonical = SYNONYMS
        .get(lower.as_str())
        .copied()
        .unwrap_or(lower.as_str());
    CONDITION_CODES.get(canonical)
}
