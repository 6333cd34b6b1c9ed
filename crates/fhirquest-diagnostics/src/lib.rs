//! Spans and error types shared across the fhirquest crates

mod error;
mod span;

pub use error::{FhirquestError, Result};
pub use span::Span;
