//! Token-attribute patterns and the priority-ordered rule table

use fhirquest_annotate::{PosTag, Token};
use once_cell::sync::Lazy;

/// A predicate over a single token.
///
/// The dynamic attribute dictionaries of statistical matchers are
/// re-expressed here as a closed set of tagged variants evaluated by a
/// small interpreter; adding a new attribute means adding a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPredicate {
    /// Lower-cased token text equals the given word
    LowerEquals(String),
    /// Lower-cased token text is one of the given words
    LowerIn(Vec<String>),
    /// Token carries the given part-of-speech tag
    PosEquals(PosTag),
}

impl TokenPredicate {
    /// Shorthand for [`TokenPredicate::LowerEquals`]
    pub fn lower(word: impl Into<String>) -> Self {
        Self::LowerEquals(word.into())
    }

    /// Shorthand for [`TokenPredicate::LowerIn`]
    pub fn any_of<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::LowerIn(words.into_iter().map(Into::into).collect())
    }

    /// Evaluate the predicate against one token
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Self::LowerEquals(word) => token.lower() == *word,
            Self::LowerIn(words) => {
                let lower = token.lower();
                words.iter().any(|w| *w == lower)
            }
            Self::PosEquals(pos) => token.pos == *pos,
        }
    }
}

/// A named intent pattern: an ordered sequence of token predicates that
/// must match a contiguous window of the token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentPattern {
    /// Canonical intent name produced on a match
    pub name: String,
    /// Predicates applied to consecutive tokens
    pub steps: Vec<TokenPredicate>,
}

impl IntentPattern {
    /// Create a pattern
    pub fn new(name: impl Into<String>, steps: Vec<TokenPredicate>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Whether any contiguous token window satisfies every step in order
    pub fn matches(&self, tokens: &[Token]) -> bool {
        if self.steps.is_empty() || tokens.len() < self.steps.len() {
            return false;
        }
        tokens.windows(self.steps.len()).any(|window| {
            self.steps
                .iter()
                .zip(window)
                .all(|(step, token)| step.matches(token))
        })
    }
}

/// Priority-ordered pattern table.
///
/// Table order is the only tie-break: the first structurally matching
/// pattern wins. Read-only once constructed; injected into the pipeline
/// rather than referenced ambiently.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentRuleSet {
    patterns: Vec<IntentPattern>,
}

impl IntentRuleSet {
    /// Build a rule set from patterns in priority order
    pub fn new(patterns: Vec<IntentPattern>) -> Self {
        Self { patterns }
    }

    /// Patterns in priority order
    pub fn patterns(&self) -> &[IntentPattern] {
        &self.patterns
    }

    /// Name of the first pattern matching the token sequence
    pub fn first_match(&self, tokens: &[Token]) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.matches(tokens))
            .map(|p| p.name.as_str())
    }
}

static DEFAULT_RULES: Lazy<IntentRuleSet> = Lazy::new(|| {
    use TokenPredicate as P;
    IntentRuleSet::new(vec![
        IntentPattern::new(
            "count_patient",
            vec![
                P::lower("how"),
                P::lower("many"),
                P::any_of(["patient", "patients"]),
            ],
        ),
        IntentPattern::new(
            "get_condition",
            vec![P::any_of([
                "condition",
                "conditions",
                "diagnosis",
                "diagnoses",
            ])],
        ),
        IntentPattern::new(
            "get_observation",
            vec![P::any_of([
                "observation",
                "observations",
                "lab",
                "labs",
                "vitals",
            ])],
        ),
        IntentPattern::new(
            "get_patient",
            vec![P::any_of(["patient", "patients"])],
        ),
    ])
});

/// The built-in pattern table, initialized once per process
pub fn default_rules() -> &'static IntentRuleSet {
    &DEFAULT_RULES
}
