//! Mapping from (intent, entities) to a structured search request

use fhirquest_extract::Extraction;
use fhirquest_intent::IntentResult;
use indexmap::IndexMap;
use log::debug;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// FHIR resource type targeted by a search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceType {
    Patient,
    Condition,
    Observation,
}

impl ResourceType {
    /// Resource type name as it appears in URLs
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Condition => "Condition",
            Self::Observation => "Observation",
        }
    }

    fn from_intent(intent: Option<&str>) -> Self {
        match intent {
            Some(name) if name.contains("condition") => Self::Condition,
            Some(name) if name.contains("observation") => Self::Observation,
            _ => Self::Patient,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured search-request descriptor: resource type plus ordered
/// filter parameters. Built once per query; immutable afterwards.
///
/// Serializes to the wire shape `{method, url, params}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// HTTP method (always GET for searches)
    pub method: &'static str,
    /// Target resource type
    pub resource_type: ResourceType,
    /// Filter parameters in deterministic insertion order
    pub params: IndexMap<String, String>,
}

impl SearchRequest {
    /// Relative search URL for the target resource type
    pub fn url(&self) -> String {
        format!("/{}", self.resource_type)
    }

    /// Desired result cardinality, when a `_count` filter is present
    pub fn count(&self) -> Option<usize> {
        self.params.get("_count").and_then(|v| v.parse().ok())
    }

    /// Condition keyword carried by whichever condition filter key the
    /// resource type uses, if any
    pub fn condition_keyword(&self) -> Option<&str> {
        const KEYS: [&str; 3] = [
            "_has:Condition:patient:code:text",
            "code:text",
            "patient._has:Condition:patient:code:text",
        ];
        KEYS.iter()
            .find_map(|key| self.params.get(*key))
            .map(String::as_str)
    }

    /// Birth-year cutoff from the birth-date upper-bound filter, if any
    pub fn birth_year_cutoff(&self) -> Option<i32> {
        self.params
            .get("birthdate")
            .or_else(|| self.params.get("patient.birthdate"))
            .and_then(|v| v.strip_prefix("le"))
            .and_then(|year| year.parse().ok())
    }
}

impl Serialize for SearchRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchRequest", 3)?;
        state.serialize_field("method", self.method)?;
        state.serialize_field("url", &self.url())?;
        state.serialize_field("params", &self.params)?;
        state.end()
    }
}

/// Translate an interpreted query into a search-request descriptor.
///
/// The resource type follows the intent (condition- and
/// observation-centric intents shift the parameter keys onto chained or
/// reverse-reference forms); an age threshold A becomes a
/// less-than-or-equal birth-date filter at `current_year - A`; a count
/// becomes `_count`.
pub fn translate(
    intent: &IntentResult,
    extraction: &Extraction,
    current_year: i32,
) -> SearchRequest {
    let resource_type = ResourceType::from_intent(intent.intent.as_deref());
    let mut params = IndexMap::new();

    if let Some(keyword) = extraction.first_condition() {
        let key = match resource_type {
            ResourceType::Patient => "_has:Condition:patient:code:text",
            ResourceType::Condition => "code:text",
            ResourceType::Observation => "patient._has:Condition:patient:code:text",
        };
        params.insert(key.to_string(), keyword);
    }

    if let Some(age) = extraction.first_age_threshold() {
        let key = match resource_type {
            ResourceType::Patient => "birthdate",
            _ => "patient.birthdate",
        };
        let cutoff = current_year - age as i32;
        params.insert(key.to_string(), format!("le{cutoff}"));
    }

    if let Some(count) = extraction.first_count() {
        params.insert("_count".to_string(), count.to_string());
    }

    debug!(
        "translated intent {:?} into {} search with {} params",
        intent.intent,
        resource_type,
        params.len()
    );
    SearchRequest {
        method: "GET",
        resource_type,
        params,
    }
}
