//! Tokens and part-of-speech tags

use fhirquest_diagnostics::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse part-of-speech tag assigned by the annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    /// Verb ("show", "find")
    Verb,
    /// Noun (default open-class tag)
    Noun,
    /// Pronoun ("me", "us")
    Pron,
    /// Determiner ("all", "the")
    Det,
    /// Adposition ("over", "with")
    Adp,
    /// Numeral ("5", "fifty")
    Num,
    /// Adjective ("diabetic", "female")
    Adj,
    /// Anything the tagger has no rule for
    Other,
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PosTag::Verb => "VERB",
            PosTag::Noun => "NOUN",
            PosTag::Pron => "PRON",
            PosTag::Det => "DET",
            PosTag::Adp => "ADP",
            PosTag::Num => "NUM",
            PosTag::Adj => "ADJ",
            PosTag::Other => "X",
        };
        f.write_str(s)
    }
}

/// A single token of the query, with its tag and byte span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text as it appears in the query
    pub text: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Byte span within the query string
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, pos: PosTag, span: Span) -> Self {
        Self {
            text: text.into(),
            pos,
            span,
        }
    }

    /// Lower-cased token text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Whether the token starts with an upper-case letter
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}
