//! Token annotation for fhirquest
//!
//! Splits a free-text query into tokens, assigns part-of-speech tags and
//! baseline general-purpose entity spans (persons, organizations,
//! locations, cardinal numbers). The annotator sits behind the
//! [`Annotator`] trait so the rest of the pipeline never depends on a
//! particular backend; [`HeuristicAnnotator`] is the deterministic
//! lexicon-driven default.

mod annotator;
mod entity;
mod lexicon;
mod token;

pub use annotator::{Annotation, Annotator, HeuristicAnnotator};
pub use entity::{Entity, EntityLabel};
pub use lexicon::parse_cardinal;
pub use token::{PosTag, Token};
