//! Labeled entity spans

use fhirquest_diagnostics::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of a recognized entity span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// Named person (honorific-anchored)
    Person,
    /// Organization or care facility
    Org,
    /// Geopolitical entity (city gazetteer)
    Gpe,
    /// Cardinal number recognized by the annotator
    Cardinal,
    /// Number recognized by the domain numeric pass
    Number,
    /// Medical condition keyword
    Condition,
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Cardinal => "CARDINAL",
            EntityLabel::Number => "NUMBER",
            EntityLabel::Condition => "CONDITION",
        };
        f.write_str(s)
    }
}

/// A labeled span of the query text, immutable once produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Text covered by the span
    pub text: String,
    /// Entity label
    pub label: EntityLabel,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Entity {
    /// Create an entity from a span over the query text
    pub fn new(text: impl Into<String>, label: EntityLabel, span: Span) -> Self {
        Self {
            text: text.into(),
            label,
            start: span.start,
            end: span.end,
        }
    }

    /// The byte span of this entity
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}
