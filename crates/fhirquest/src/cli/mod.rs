//! CLI functionality for the fhirquest tool
//!
//! This module contains all CLI-related functionality including:
//! - Query interpretation commands
//! - Output formatting

#[cfg(feature = "cli")]
pub mod output;
#[cfg(feature = "cli")]
pub mod query;
