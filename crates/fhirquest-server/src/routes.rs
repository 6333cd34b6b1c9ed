//! Route handlers

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use chrono::Utc;
use fhirquest::{FhirquestError, Pipeline, PipelineOutput};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

type SharedPipeline = Arc<Pipeline>;

/// Build the application router over a shared pipeline
pub fn router(pipeline: SharedPipeline) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/query-simple/:query", get(query_simple))
        .route("/patient-query", get(patient_query))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(pipeline)
}

/// JSON body for `POST /query`
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Optional query-string parameter on the legacy path
#[derive(Debug, Deserialize)]
pub struct LegacyParams {
    pub query: Option<String>,
}

/// API error mapped onto an HTTP status and a JSON body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
        }
    }
}

impl From<FhirquestError> for ApiError {
    fn from(error: FhirquestError) -> Self {
        let status = match error {
            FhirquestError::EmptyQuery | FhirquestError::Request { .. } => {
                StatusCode::BAD_REQUEST
            }
            FhirquestError::Annotator { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            error: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.error }))).into_response()
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "fhirquest",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/query": "POST - interpret a natural-language healthcare query",
            "/query-simple/{query}": "GET - same, with the query in the path",
            "/patient-query": "GET - legacy, query passed as ?query=",
            "/health": "GET - health check"
        }
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn query(
    State(pipeline): State<SharedPipeline>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<PipelineOutput>, ApiError> {
    run_pipeline(&pipeline, &request.query)
}

async fn query_simple(
    State(pipeline): State<SharedPipeline>,
    Path(query): Path<String>,
) -> Result<Json<PipelineOutput>, ApiError> {
    run_pipeline(&pipeline, &query)
}

async fn patient_query(
    State(pipeline): State<SharedPipeline>,
    Query(params): Query<LegacyParams>,
) -> Result<Json<PipelineOutput>, ApiError> {
    let query = params
        .query
        .ok_or_else(|| ApiError::bad_request("missing 'query' parameter"))?;
    run_pipeline(&pipeline, &query)
}

fn run_pipeline(pipeline: &Pipeline, query: &str) -> Result<Json<PipelineOutput>, ApiError> {
    let output = pipeline.run(query)?;
    Ok(Json(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pipeline() -> SharedPipeline {
        Arc::new(Pipeline::with_defaults().unwrap())
    }

    #[tokio::test]
    async fn test_query_endpoint_runs_pipeline() {
        let response = query(
            State(pipeline()),
            Json(QueryRequest {
                query: "find diabetic patients".to_string(),
            }),
        )
        .await
        .expect("query should succeed");
        assert_eq!(response.0.analysis.intent.as_deref(), Some("get_patient"));
        assert_eq!(response.0.bundle.total, 3);
    }

    #[tokio::test]
    async fn test_empty_query_is_a_client_error() {
        let error = query(
            State(pipeline()),
            Json(QueryRequest {
                query: "   ".to_string(),
            }),
        )
        .await
        .expect_err("empty query must be rejected");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_path_embedded_query() {
        let response = query_simple(
            State(pipeline()),
            Path("show me all patients".to_string()),
        )
        .await
        .expect("path query should succeed");
        assert_eq!(response.0.analysis.intent.as_deref(), Some("get_patient"));
    }

    #[tokio::test]
    async fn test_legacy_route_requires_parameter() {
        let error = patient_query(State(pipeline()), Query(LegacyParams { query: None }))
            .await
            .expect_err("missing parameter must be rejected");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }
}
