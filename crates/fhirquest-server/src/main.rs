//! fhirquest HTTP server
//!
//! Thin plumbing around the query pipeline: routing, request validation
//! and process lifecycle. All decision logic lives in the `fhirquest`
//! crates; every handler is a stateless call into one shared pipeline.

mod routes;

use anyhow::{Context, Result};
use fhirquest::Pipeline;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fhirquest_server=info,tower_http=info".into()),
        )
        .init();

    // The pipeline cannot run without tokens: an annotator failure is
    // fatal here, before the listener binds.
    let pipeline = Pipeline::with_defaults()
        .context("annotation backend failed to initialize")?;
    let app = routes::router(Arc::new(pipeline));

    let addr: SocketAddr = std::env::var("FHIRQUEST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()
        .context("invalid FHIRQUEST_ADDR")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("fhirquest server listening on {addr}");

    axum::serve(listener, app).await.context("server error")
}
