//! Entity extraction for fhirquest
//!
//! Produces the union of the annotator's builtin entities and two custom
//! passes: a condition-keyword recognizer and a numeric pass that
//! classifies each number as a result count or an age threshold. Entities
//! come back in document order; overlapping spans from different sources
//! are all kept.

mod extractor;
mod numbers;

pub use extractor::{CONDITION_KEYWORDS, EntityExtractor, Extraction};
pub use numbers::{NumberRole, NumericMention};
