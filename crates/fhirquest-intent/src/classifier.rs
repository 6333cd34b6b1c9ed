//! Intent classification over an annotated token sequence

use crate::pattern::IntentRuleSet;
use fhirquest_annotate::{PosTag, Token};
use log::debug;
use serde::{Deserialize, Serialize};

/// Fixed confidence attached to any produced intent.
///
/// This is a heuristic constant, not a calibrated probability; callers
/// must not treat it as a statistical score.
pub const PATTERN_CONFIDENCE: f64 = 0.9;

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Canonical pattern name, `action_<verb>` fallback, or `None` when
    /// no pattern matches and no verb exists
    pub intent: Option<String>,
    /// [`PATTERN_CONFIDENCE`] whenever an intent was produced; unset
    /// otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl IntentResult {
    fn some(intent: impl Into<String>) -> Self {
        Self {
            intent: Some(intent.into()),
            confidence: Some(PATTERN_CONFIDENCE),
        }
    }

    fn none() -> Self {
        Self {
            intent: None,
            confidence: None,
        }
    }
}

/// Classifies token sequences against a priority-ordered rule table.
///
/// Purely functional over its input; holds only a reference to the
/// read-only table.
#[derive(Debug, Clone)]
pub struct IntentClassifier<'r> {
    rules: &'r IntentRuleSet,
}

impl<'r> IntentClassifier<'r> {
    /// Create a classifier over the given rule table
    pub fn new(rules: &'r IntentRuleSet) -> Self {
        Self { rules }
    }

    /// Classify one annotated token sequence.
    ///
    /// Returns the first matching pattern in table order; otherwise
    /// `action_<verb>` from the first verb-tagged token; otherwise no
    /// intent at all.
    pub fn classify(&self, tokens: &[Token]) -> IntentResult {
        if let Some(name) = self.rules.first_match(tokens) {
            debug!("intent pattern matched: {name}");
            return IntentResult::some(name);
        }
        if let Some(verb) = tokens.iter().find(|t| t.pos == PosTag::Verb) {
            let intent = format!("action_{}", verb.lower());
            debug!("no pattern matched, verb fallback: {intent}");
            return IntentResult::some(intent);
        }
        debug!("no pattern matched and no verb present");
        IntentResult::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::default_rules;
    use fhirquest_diagnostics::Span;

    fn tokens(words: &[(&str, PosTag)]) -> Vec<Token> {
        let mut offset = 0;
        words
            .iter()
            .map(|(text, pos)| {
                let span = Span::new(offset, offset + text.len());
                offset += text.len() + 1;
                Token::new(*text, *pos, span)
            })
            .collect()
    }

    #[test]
    fn test_pattern_match_with_fixed_confidence() {
        let classifier = IntentClassifier::new(default_rules());
        let result = classifier.classify(&tokens(&[
            ("show", PosTag::Verb),
            ("me", PosTag::Pron),
            ("all", PosTag::Det),
            ("patients", PosTag::Noun),
        ]));
        assert_eq!(result.intent.as_deref(), Some("get_patient"));
        assert_eq!(result.confidence, Some(PATTERN_CONFIDENCE));
    }

    #[test]
    fn test_verb_fallback() {
        let classifier = IntentClassifier::new(default_rules());
        let result = classifier.classify(&tokens(&[
            ("fetch", PosTag::Verb),
            ("everything", PosTag::Noun),
        ]));
        assert_eq!(result.intent.as_deref(), Some("action_fetch"));
        assert_eq!(result.confidence, Some(PATTERN_CONFIDENCE));
    }

    #[test]
    fn test_fallback_uses_first_verb() {
        let classifier = IntentClassifier::new(default_rules());
        let result = classifier.classify(&tokens(&[
            ("find", PosTag::Verb),
            ("and", PosTag::Other),
            ("list", PosTag::Verb),
            ("records", PosTag::Noun),
        ]));
        assert_eq!(result.intent.as_deref(), Some("action_find"));
    }

    #[test]
    fn test_no_pattern_no_verb_yields_none() {
        let classifier = IntentClassifier::new(default_rules());
        let result = classifier.classify(&tokens(&[
            ("weather", PosTag::Noun),
            ("today", PosTag::Noun),
        ]));
        assert_eq!(result.intent, None);
        assert_eq!(result.confidence, None);
    }

    #[test]
    fn test_empty_token_sequence() {
        let classifier = IntentClassifier::new(default_rules());
        let result = classifier.classify(&[]);
        assert_eq!(result.intent, None);
        assert_eq!(result.confidence, None);
    }

    #[test]
    fn test_condition_pattern_outranks_patient_pattern() {
        let classifier = IntentClassifier::new(default_rules());
        let result = classifier.classify(&tokens(&[
            ("list", PosTag::Verb),
            ("conditions", PosTag::Noun),
            ("of", PosTag::Adp),
            ("patients", PosTag::Noun),
        ]));
        assert_eq!(result.intent.as_deref(), Some("get_condition"));
    }

    #[test]
    fn test_confidence_omitted_from_json_when_unset() {
        let result = IntentResult {
            intent: None,
            confidence: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("confidence").is_none());
    }
}
