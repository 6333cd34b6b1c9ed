//! Closed-class word lists backing the heuristic tagger

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Closed-class lexicons consulted by [`HeuristicAnnotator`]
///
/// [`HeuristicAnnotator`]: crate::HeuristicAnnotator
#[derive(Debug)]
pub(crate) struct Lexicon {
    pub verbs: HashSet<&'static str>,
    pub pronouns: HashSet<&'static str>,
    pub determiners: HashSet<&'static str>,
    pub adpositions: HashSet<&'static str>,
    pub adjectives: HashSet<&'static str>,
    pub honorifics: HashSet<&'static str>,
    pub facilities: HashSet<&'static str>,
    pub places: HashSet<&'static str>,
}

const VERBS: &[&str] = &[
    "show", "find", "get", "list", "display", "give", "fetch", "count",
    "search", "retrieve", "tell", "bring", "pull", "lookup", "identify",
];

const PRONOUNS: &[&str] = &["me", "us", "my", "our", "i", "we", "who"];

const DETERMINERS: &[&str] = &["a", "an", "the", "all", "any", "every", "each", "some"];

const ADPOSITIONS: &[&str] = &[
    "of", "with", "over", "under", "above", "below", "than", "for", "in",
    "by", "to", "from", "at", "on", "between",
];

// Clinical and demographic adjectives seen in queries. Kept independent of
// the condition-keyword table in fhirquest-extract: this list only drives
// POS tagging.
const ADJECTIVES: &[&str] = &[
    "diabetic", "hypertensive", "asthmatic", "cardiac", "male", "female",
    "elderly", "young", "active", "chronic", "recent", "old", "many",
];

const HONORIFICS: &[&str] = &["dr", "doctor", "mr", "mrs", "ms", "nurse", "prof"];

const FACILITIES: &[&str] = &["hospital", "clinic", "center", "laboratory", "practice"];

const PLACES: &[&str] = &[
    "boston", "chicago", "seattle", "denver", "houston", "london",
    "toronto", "dublin", "berlin",
];

impl Lexicon {
    /// Build the lexicon, verifying every word list is populated.
    /// An empty list means the annotation backend cannot tag reliably,
    /// which the caller treats as a startup failure.
    pub(crate) fn load() -> Result<Self, String> {
        let lexicon = Self {
            verbs: VERBS.iter().copied().collect(),
            pronouns: PRONOUNS.iter().copied().collect(),
            determiners: DETERMINERS.iter().copied().collect(),
            adpositions: ADPOSITIONS.iter().copied().collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
            honorifics: HONORIFICS.iter().copied().collect(),
            facilities: FACILITIES.iter().copied().collect(),
            places: PLACES.iter().copied().collect(),
        };
        for (name, set) in [
            ("verbs", &lexicon.verbs),
            ("pronouns", &lexicon.pronouns),
            ("determiners", &lexicon.determiners),
            ("adpositions", &lexicon.adpositions),
            ("adjectives", &lexicon.adjectives),
            ("honorifics", &lexicon.honorifics),
            ("facilities", &lexicon.facilities),
            ("places", &lexicon.places),
        ] {
            if set.is_empty() {
                return Err(format!("lexicon word list '{name}' is empty"));
            }
        }
        Ok(lexicon)
    }
}

/// Parse a token as a cardinal number: either a digit run or one of a
/// small lexicon of number words.
pub fn parse_cardinal(text: &str) -> Option<i64> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }
    NUMBER_WORDS.get(text.to_lowercase().as_str()).copied()
}

static NUMBER_WORDS: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("zero", 0), ("one", 1), ("two", 2), ("three", 3), ("four", 4),
        ("five", 5), ("six", 6), ("seven", 7), ("eight", 8), ("nine", 9),
        ("ten", 10), ("eleven", 11), ("twelve", 12), ("thirteen", 13),
        ("fourteen", 14), ("fifteen", 15), ("sixteen", 16),
        ("seventeen", 17), ("eighteen", 18), ("nineteen", 19),
        ("twenty", 20), ("thirty", 30), ("forty", 40), ("fifty", 50),
        ("sixty", 60), ("seventy", 70), ("eighty", 80), ("ninety", 90),
        ("hundred", 100),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", Some(5))]
    #[case("120", Some(120))]
    #[case("fifty", Some(50))]
    #[case("Five", Some(5))]
    #[case("patients", None)]
    #[case("", None)]
    #[case("5th", None)]
    fn test_parse_cardinal(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_cardinal(text), expected);
    }

    #[test]
    fn test_lexicon_loads() {
        let lexicon = Lexicon::load().unwrap();
        assert!(lexicon.verbs.contains("show"));
        assert!(lexicon.adjectives.contains("diabetic"));
    }
}
