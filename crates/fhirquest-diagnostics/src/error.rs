//! fhirquest error types

use thiserror::Error;

/// Result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, FhirquestError>;

/// Main fhirquest error type
#[derive(Debug, Clone, Error)]
pub enum FhirquestError {
    /// Query string was empty or whitespace-only; rejected before the
    /// pipeline runs
    #[error("query must not be empty")]
    EmptyQuery,

    /// The token annotator failed to initialize or to process input.
    /// Fatal at startup: the pipeline cannot run without tokens.
    #[error("annotator unavailable: {message}")]
    Annotator {
        /// What went wrong inside the annotation backend
        message: String,
    },

    /// The translated request was malformed (e.g. an unparseable
    /// `_count` value injected by a caller)
    #[error("invalid search request: {message}")]
    Request {
        /// Description of the malformed part
        message: String,
    },
}

impl FhirquestError {
    /// Create an annotator error
    pub fn annotator(message: impl Into<String>) -> Self {
        Self::Annotator {
            message: message.into(),
        }
    }

    /// Create a request error
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FhirquestError::annotator("lexicon failed to load");
        assert!(err.to_string().contains("annotator unavailable"));
        assert!(err.to_string().contains("lexicon"));
    }

    #[test]
    fn test_empty_query_display() {
        assert_eq!(
            FhirquestError::EmptyQuery.to_string(),
            "query must not be empty"
        );
    }
}
