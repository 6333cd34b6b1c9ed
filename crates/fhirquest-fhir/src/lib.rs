//! FHIR-side translation for fhirquest
//!
//! Maps an (intent, entity set) interpretation onto a structured FHIR
//! search request, and fabricates a deterministic searchset bundle whose
//! cardinality and filters reflect that request. No network or
//! persistence effects anywhere: the translator only builds a
//! descriptor and the synthesizer only builds JSON-serializable values.

mod codes;
mod request;
mod synthesize;

pub use codes::{ConditionCode, SNOMED_SYSTEM, condition_code};
pub use request::{ResourceType, SearchRequest, translate};
pub use synthesize::{
    Bundle, BundleEntry, CodeableConcept, Coding, ConditionResource, DEFAULT_COUNT, HumanName,
    PatientResource, Reference, Resource, synthesize,
};
