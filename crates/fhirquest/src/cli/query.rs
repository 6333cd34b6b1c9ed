//! Query interpretation commands

use crate::Pipeline;
use crate::cli::output;
use anyhow::Result;

/// Print the intent/entity analysis for a query
pub fn analyze(pipeline: &Pipeline, query: &str, pretty: bool) -> Result<()> {
    let analysis = pipeline.analyze(query)?;
    output::write_json(&analysis, pretty)
}

/// Print the translated search request for a query
pub fn translate(pipeline: &Pipeline, query: &str, pretty: bool) -> Result<()> {
    let interpretation = pipeline.interpret(query)?;
    let request = pipeline.translate(&interpretation);
    output::write_json(&request, pretty)
}

/// Print the synthesized bundle for a query
pub fn bundle(pipeline: &Pipeline, query: &str, pretty: bool) -> Result<()> {
    let interpretation = pipeline.interpret(query)?;
    let request = pipeline.translate(&interpretation);
    let bundle = pipeline.synthesize(&request);
    output::write_json(&bundle, pretty)
}

/// Print the full pipeline output for a query
pub fn run(pipeline: &Pipeline, query: &str, pretty: bool) -> Result<()> {
    let output_value = pipeline.run(query)?;
    output::write_json(&output_value, pretty)
}
