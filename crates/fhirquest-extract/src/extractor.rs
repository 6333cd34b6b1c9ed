//! The entity extractor: builtin merge plus the two domain passes

use crate::numbers::{NumberRole, NumericMention};
use fhirquest_annotate::{Annotation, Entity, EntityLabel, parse_cardinal};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Condition keywords recognized by the condition pass.
///
/// Matching is exact token equality on the lower-cased text, never
/// substring containment: "antidiabetic" must not match.
pub static CONDITION_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "diabetic",
        "diabetes",
        "hypertensive",
        "hypertension",
        "asthmatic",
        "asthma",
        "cardiac",
    ])
});

/// Everything the extractor found in one query
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// All entities (builtin and custom) in document order
    pub entities: Vec<Entity>,
    /// Numeric mentions with derived roles, in document order
    pub numbers: Vec<NumericMention>,
}

impl Extraction {
    /// First condition keyword in the query, lower-cased
    pub fn first_condition(&self) -> Option<String> {
        self.entities
            .iter()
            .find(|e| e.label == EntityLabel::Condition)
            .map(|e| e.text.to_lowercase())
    }

    /// First age-threshold number. First occurrence wins when a query
    /// carries several numbers in the age band.
    pub fn first_age_threshold(&self) -> Option<i64> {
        self.numbers
            .iter()
            .find(|n| n.role == NumberRole::AgeThreshold)
            .map(|n| n.value)
    }

    /// First count number. Same first-occurrence precedence as the age
    /// case.
    pub fn first_count(&self) -> Option<i64> {
        self.numbers
            .iter()
            .find(|n| n.role == NumberRole::Count)
            .map(|n| n.value)
    }
}

/// Merges the annotator's entities with the condition and numeric passes.
///
/// Stateless; holds only the read-only keyword set.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    keywords: &'static HashSet<&'static str>,
}

impl EntityExtractor {
    /// Create an extractor over the built-in condition keyword set
    pub fn new() -> Self {
        Self {
            keywords: &CONDITION_KEYWORDS,
        }
    }

    /// Run all passes over one annotation
    pub fn extract(&self, annotation: &Annotation) -> Extraction {
        let mut entities = annotation.entities.clone();
        let mut numbers = Vec::new();

        for token in &annotation.tokens {
            let lower = token.lower();
            if self.keywords.contains(lower.as_str()) {
                entities.push(Entity::new(
                    token.text.as_str(),
                    EntityLabel::Condition,
                    token.span,
                ));
            }
            if let Some(value) = parse_cardinal(&token.text) {
                entities.push(Entity::new(token.text.as_str(), EntityLabel::Number, token.span));
                numbers.push(NumericMention::new(value, token.span.start));
            }
        }

        // Union across sources keeps overlaps; restore document order.
        // The sort is stable, so a builtin CARDINAL precedes the custom
        // NUMBER over the same span.
        entities.sort_by_key(|e| e.start);
        debug!(
            "extracted {} entities, {} numeric mentions",
            entities.len(),
            numbers.len()
        );
        Extraction { entities, numbers }
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}
