//! Output formatting utilities

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Serialize a value to stdout as JSON
pub fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {}", "Error:".red().bold(), error)
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}
