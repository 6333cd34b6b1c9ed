//! The `Annotator` trait and the default heuristic backend

use crate::entity::{Entity, EntityLabel};
use crate::lexicon::{Lexicon, parse_cardinal};
use crate::token::{PosTag, Token};
use fhirquest_diagnostics::{FhirquestError, Result, Span};
use log::debug;

/// Output of a single annotation pass: tokens plus the baseline
/// general-purpose entities found among them, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Tokens of the query, in order
    pub tokens: Vec<Token>,
    /// Baseline entities (PERSON, ORG, GPE, CARDINAL)
    pub entities: Vec<Entity>,
}

impl Annotation {
    /// Token texts in order
    pub fn token_texts(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.text.clone()).collect()
    }

    /// POS tag names in token order
    pub fn pos_tags(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.pos.to_string()).collect()
    }
}

/// The annotation backend consumed by the pipeline.
///
/// Implementations must be deterministic for a given query and must not
/// retain state across calls.
pub trait Annotator: Send + Sync {
    /// Annotate one query string
    fn annotate(&self, query: &str) -> Result<Annotation>;
}

/// Deterministic lexicon-driven annotator.
///
/// Tokenizes on non-alphanumeric boundaries, tags tokens from closed-class
/// word lists (open-class default is NOUN), and recognizes baseline
/// entities: honorific-anchored persons, facility-suffixed organizations,
/// gazetteer places and cardinal numbers.
#[derive(Debug)]
pub struct HeuristicAnnotator {
    lexicon: Lexicon,
}

impl HeuristicAnnotator {
    /// Build the annotator, loading its lexicons.
    ///
    /// Returns [`FhirquestError::Annotator`] when a word list fails to
    /// load; callers treat this as fatal at startup since the pipeline
    /// cannot run without tokens.
    pub fn new() -> Result<Self> {
        let lexicon = Lexicon::load().map_err(FhirquestError::annotator)?;
        Ok(Self { lexicon })
    }

    fn tag(&self, text: &str) -> PosTag {
        let lower = text.to_lowercase();
        let lower = lower.as_str();
        if parse_cardinal(lower).is_some() {
            PosTag::Num
        } else if self.lexicon.verbs.contains(lower) {
            PosTag::Verb
        } else if self.lexicon.pronouns.contains(lower) {
            PosTag::Pron
        } else if self.lexicon.determiners.contains(lower) {
            PosTag::Det
        } else if self.lexicon.adpositions.contains(lower) {
            PosTag::Adp
        } else if self.lexicon.adjectives.contains(lower) {
            PosTag::Adj
        } else {
            // Open-class default; the tokenizer only emits alphanumeric runs
            PosTag::Noun
        }
    }

    fn builtin_entities(&self, query: &str, tokens: &[Token]) -> Vec<Entity> {
        let mut entities = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let lower = token.lower();

            // Honorific followed by a capitalized token spans both.
            if self.lexicon.honorifics.contains(lower.as_str()) {
                if let Some(name) = tokens.get(i + 1).filter(|t| t.is_capitalized()) {
                    let span = token.span.merge(name.span);
                    entities.push(Entity::new(
                        &query[span.as_range()],
                        EntityLabel::Person,
                        span,
                    ));
                }
                continue;
            }

            // Facility keyword preceded by a capitalized token spans both.
            if self.lexicon.facilities.contains(lower.as_str()) {
                if i > 0 && tokens[i - 1].is_capitalized() {
                    let span = tokens[i - 1].span.merge(token.span);
                    entities.push(Entity::new(
                        &query[span.as_range()],
                        EntityLabel::Org,
                        span,
                    ));
                }
                continue;
            }

            if self.lexicon.places.contains(lower.as_str()) {
                entities.push(Entity::new(token.text.as_str(), EntityLabel::Gpe, token.span));
                continue;
            }

            if token.pos == PosTag::Num {
                entities.push(Entity::new(token.text.as_str(), EntityLabel::Cardinal, token.span));
            }
        }
        // ORG spans start one token back; restore document order.
        entities.sort_by_key(|e| e.start);
        entities
    }
}

impl Annotator for HeuristicAnnotator {
    fn annotate(&self, query: &str) -> Result<Annotation> {
        let mut tokens = Vec::new();
        for (start, end) in word_boundaries(query) {
            let text = &query[start..end];
            let pos = self.tag(text);
            tokens.push(Token::new(text, pos, Span::new(start, end)));
        }
        let entities = self.builtin_entities(query, &tokens);
        debug!(
            "annotated {} tokens, {} baseline entities",
            tokens.len(),
            entities.len()
        );
        Ok(Annotation { tokens, entities })
    }
}

/// Byte ranges of alphanumeric runs; punctuation and whitespace separate
/// tokens and are not emitted.
fn word_boundaries(query: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    for (i, ch) in query.char_indices() {
        if ch.is_alphanumeric() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            ranges.push((s, i));
        }
    }
    if let Some(s) = start {
        ranges.push((s, query.len()));
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn annotator() -> HeuristicAnnotator {
        HeuristicAnnotator::new().unwrap()
    }

    #[test]
    fn test_tokenization_and_tags() {
        let ann = annotator().annotate("show me all patients").unwrap();
        assert_eq!(ann.token_texts(), vec!["show", "me", "all", "patients"]);
        assert_eq!(ann.pos_tags(), vec!["VERB", "PRON", "DET", "NOUN"]);
    }

    #[test]
    fn test_token_spans_slice_back() {
        let query = "find 5 diabetic patients";
        let ann = annotator().annotate(query).unwrap();
        for token in &ann.tokens {
            assert_eq!(&query[token.span.as_range()], token.text);
        }
    }

    #[test]
    fn test_punctuation_is_not_a_token() {
        let ann = annotator().annotate("patients, over 50?").unwrap();
        assert_eq!(ann.token_texts(), vec!["patients", "over", "50"]);
    }

    #[test]
    fn test_cardinal_entity() {
        let ann = annotator().annotate("show me 5 patients").unwrap();
        let cardinals: Vec<_> = ann
            .entities
            .iter()
            .filter(|e| e.label == EntityLabel::Cardinal)
            .collect();
        assert_eq!(cardinals.len(), 1);
        assert_eq!(cardinals[0].text, "5");
        assert_eq!(cardinals[0].start, 8);
        assert_eq!(cardinals[0].end, 9);
    }

    #[test]
    fn test_person_entity_spans_honorific_and_name() {
        let ann = annotator().annotate("patients of Dr Watson").unwrap();
        let person = ann
            .entities
            .iter()
            .find(|e| e.label == EntityLabel::Person)
            .expect("person entity");
        assert_eq!(person.text, "Dr Watson");
    }

    #[test]
    fn test_gpe_entity() {
        let ann = annotator().annotate("patients in Boston").unwrap();
        let gpe = ann
            .entities
            .iter()
            .find(|e| e.label == EntityLabel::Gpe)
            .expect("gpe entity");
        assert_eq!(gpe.text, "Boston");
    }

    #[test]
    fn test_org_entity() {
        let ann = annotator().annotate("admitted to Mercy Hospital").unwrap();
        let org = ann
            .entities
            .iter()
            .find(|e| e.label == EntityLabel::Org)
            .expect("org entity");
        assert_eq!(org.text, "Mercy Hospital");
    }

    #[test]
    fn test_entities_in_document_order() {
        let ann = annotator()
            .annotate("show 5 patients at Mercy Hospital in Boston")
            .unwrap();
        let starts: Vec<_> = ann.entities.iter().map(|e| e.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_empty_query_yields_no_tokens() {
        let ann = annotator().annotate("").unwrap();
        assert!(ann.tokens.is_empty());
        assert!(ann.entities.is_empty());
    }
}
