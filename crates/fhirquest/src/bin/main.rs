//! fhirquest command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use fhirquest::Pipeline;
use fhirquest::cli::{output, query};

/// Healthcare natural-language query tools
#[derive(Parser)]
#[command(name = "fhirquest")]
#[command(author, version, about = "Healthcare natural-language query tools", long_about = None)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a query: intent, entities, tokens and tags
    Analyze {
        /// Free-text healthcare query
        query: String,
    },
    /// Translate a query into a FHIR search request
    Translate {
        /// Free-text healthcare query
        query: String,
    },
    /// Synthesize the result bundle for a query
    Bundle {
        /// Free-text healthcare query
        query: String,
    },
    /// Run the full pipeline: analysis, search request and bundle
    Run {
        /// Free-text healthcare query
        query: String,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    if let Err(error) = dispatch(&cli) {
        eprintln!("{}", output::format_error(&error));
        std::process::exit(1);
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    // Annotator initialization failure is fatal before any query runs
    let pipeline = Pipeline::with_defaults()?;

    match &cli.command {
        Commands::Analyze { query: q } => query::analyze(&pipeline, q, cli.pretty),
        Commands::Translate { query: q } => query::translate(&pipeline, q, cli.pretty),
        Commands::Bundle { query: q } => query::bundle(&pipeline, q, cli.pretty),
        Commands::Run { query: q } => query::run(&pipeline, q, cli.pretty),
    }
}
