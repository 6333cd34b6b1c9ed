//! Natural-language healthcare query interpretation for Rust
//!
//! This crate wires the fhirquest stages into one pipeline:
//! - Token annotation (tokens, POS tags, baseline entities)
//! - Intent classification against a priority-ordered pattern table
//! - Hybrid entity extraction (builtin entities plus condition keywords
//!   and numeric roles)
//! - Translation into a structured FHIR search request
//! - Deterministic synthesis of a searchset bundle matching the request
//!
//! # Example
//!
//! ```ignore
//! use fhirquest::Pipeline;
//!
//! let pipeline = Pipeline::with_defaults()?;
//! let output = pipeline.run("show me 5 diabetic patients over 50")?;
//! assert_eq!(output.bundle.total, 5);
//! ```

// Re-export all public APIs from internal crates
pub use fhirquest_annotate as annotate;
pub use fhirquest_diagnostics as diagnostics;
pub use fhirquest_extract as extract;
pub use fhirquest_fhir as fhir;
pub use fhirquest_intent as intent;

// Convenience re-exports
pub use fhirquest_annotate::{Annotation, Annotator, Entity, EntityLabel, HeuristicAnnotator};
pub use fhirquest_diagnostics::{FhirquestError, Result};
pub use fhirquest_extract::{EntityExtractor, Extraction};
pub use fhirquest_fhir::{Bundle, SearchRequest};
pub use fhirquest_intent::{IntentResult, IntentRuleSet};

mod pipeline;
pub use pipeline::{Interpretation, Pipeline, PipelineOutput, QueryAnalysis};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
