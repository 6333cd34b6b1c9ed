//! Intent classification for fhirquest
//!
//! Matches ordered token-attribute patterns against the annotated token
//! sequence. The pattern table is priority-ordered: the first pattern
//! that structurally matches any contiguous token window wins, with no
//! scoring between competing patterns. When nothing matches, the
//! classifier falls back to `action_<verb>` derived from the first
//! verb-tagged token.

mod classifier;
mod pattern;

pub use classifier::{IntentClassifier, IntentResult, PATTERN_CONFIDENCE};
pub use pattern::{IntentPattern, IntentRuleSet, TokenPredicate, default_rules};
