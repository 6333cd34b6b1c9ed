//! The end-to-end query pipeline

use chrono::{Datelike, Utc};
use fhirquest_annotate::{Annotation, Annotator, Entity, HeuristicAnnotator};
use fhirquest_diagnostics::{FhirquestError, Result};
use fhirquest_extract::{EntityExtractor, Extraction};
use fhirquest_fhir::{Bundle, SearchRequest, synthesize, translate};
use fhirquest_intent::{IntentClassifier, IntentResult, IntentRuleSet, default_rules};
use log::debug;
use serde::Serialize;
use std::sync::Arc;

/// The intent/entity interpretation returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnalysis {
    /// The query as received
    pub query: String,
    /// Inferred intent, if any
    pub intent: Option<String>,
    /// All recognized entities in document order
    pub entities: Vec<Entity>,
    /// Fixed heuristic confidence; unset when no intent was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Token texts in order
    pub tokens: Vec<String>,
    /// POS tag names in token order
    pub pos_tags: Vec<String>,
}

/// Full interpretation of one query, including the auxiliary numeric
/// roles the public analysis shape omits
#[derive(Debug, Clone)]
pub struct Interpretation {
    /// The query as received
    pub query: String,
    /// Annotator output
    pub annotation: Annotation,
    /// Classified intent
    pub intent: IntentResult,
    /// Extracted entities and numeric mentions
    pub extraction: Extraction,
}

impl Interpretation {
    /// Project onto the public analysis shape
    pub fn to_analysis(&self) -> QueryAnalysis {
        QueryAnalysis {
            query: self.query.clone(),
            intent: self.intent.intent.clone(),
            entities: self.extraction.entities.clone(),
            confidence: self.intent.confidence,
            tokens: self.annotation.token_texts(),
            pos_tags: self.annotation.pos_tags(),
        }
    }
}

/// Everything the pipeline produces for one query
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Intent/entity interpretation
    #[serde(flatten)]
    pub analysis: QueryAnalysis,
    /// Translated search request
    #[serde(rename = "search_request")]
    pub request: SearchRequest,
    /// Synthesized result bundle
    pub bundle: Bundle,
}

/// The query pipeline: annotator, pattern table and extractor wired
/// together.
///
/// Holds only read-only components, so one instance can serve any
/// number of concurrent queries behind an `Arc` with no coordination.
pub struct Pipeline {
    annotator: Arc<dyn Annotator>,
    rules: IntentRuleSet,
    extractor: EntityExtractor,
}

impl Pipeline {
    /// Build a pipeline from an annotation backend and a rule table
    pub fn new(annotator: Arc<dyn Annotator>, rules: IntentRuleSet) -> Self {
        Self {
            annotator,
            rules,
            extractor: EntityExtractor::new(),
        }
    }

    /// Build the default pipeline: heuristic annotator plus the built-in
    /// pattern table.
    ///
    /// Fails when the annotation backend cannot initialize; callers must
    /// treat that as fatal at startup since no query can be processed
    /// without tokens.
    pub fn with_defaults() -> Result<Self> {
        let annotator = HeuristicAnnotator::new()?;
        Ok(Self::new(Arc::new(annotator), default_rules().clone()))
    }

    /// Interpret one query: annotate, classify intent and extract
    /// entities.
    ///
    /// Rejects empty or whitespace-only queries before the pipeline
    /// runs.
    pub fn interpret(&self, query: &str) -> Result<Interpretation> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FhirquestError::EmptyQuery);
        }
        let annotation = self.annotator.annotate(query)?;
        let intent = IntentClassifier::new(&self.rules).classify(&annotation.tokens);
        let extraction = self.extractor.extract(&annotation);
        debug!(
            "interpreted query '{}' as {:?} with {} entities",
            query,
            intent.intent,
            extraction.entities.len()
        );
        Ok(Interpretation {
            query: query.to_string(),
            annotation,
            intent,
            extraction,
        })
    }

    /// Interpret one query and return the public analysis shape
    pub fn analyze(&self, query: &str) -> Result<QueryAnalysis> {
        Ok(self.interpret(query)?.to_analysis())
    }

    /// Translate an interpretation into a search request, using the
    /// current year for birth-date math
    pub fn translate(&self, interpretation: &Interpretation) -> SearchRequest {
        translate(
            &interpretation.intent,
            &interpretation.extraction,
            current_year(),
        )
    }

    /// Synthesize a result bundle for a translated request
    pub fn synthesize(&self, request: &SearchRequest) -> Bundle {
        synthesize(request, current_year())
    }

    /// Run the full pipeline over one query
    pub fn run(&self, query: &str) -> Result<PipelineOutput> {
        let interpretation = self.interpret(query)?;
        let request = self.translate(&interpretation);
        let bundle = self.synthesize(&request);
        Ok(PipelineOutput {
            analysis: interpretation.to_analysis(),
            request,
            bundle,
        })
    }
}

/// The year used for age and birth-date arithmetic
pub(crate) fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_rejected() {
        let pipeline = Pipeline::with_defaults().unwrap();
        assert!(matches!(
            pipeline.analyze(""),
            Err(FhirquestError::EmptyQuery)
        ));
        assert!(matches!(
            pipeline.analyze("   \t "),
            Err(FhirquestError::EmptyQuery)
        ));
    }

    #[test]
    fn test_analysis_shape() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let analysis = pipeline.analyze("show me all patients").unwrap();
        assert_eq!(analysis.intent.as_deref(), Some("get_patient"));
        assert!(analysis.entities.is_empty());
        assert_eq!(analysis.tokens, vec!["show", "me", "all", "patients"]);
        assert_eq!(analysis.pos_tags, vec!["VERB", "PRON", "DET", "NOUN"]);
    }

    #[test]
    fn test_output_serializes_flat() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let output = pipeline.run("find diabetic patients").unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["query"], "find diabetic patients");
        assert_eq!(json["intent"], "get_patient");
        assert_eq!(json["search_request"]["url"], "/Patient");
        assert_eq!(json["bundle"]["resourceType"], "Bundle");
    }
}
