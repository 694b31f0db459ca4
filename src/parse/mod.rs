//! Parse phase: JSON → workflow types + dependency graph construction.

pub mod graph;
pub mod types;

pub use graph::DependencyGraph;
pub use types::*;

use std::path::Path;

use crate::error::ParseError;

/// Deserialize a workflow JSON string into a `Workflow`.
pub fn parse(json: &str) -> Result<Workflow, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a workflow JSON file.
pub fn parse_file(path: &Path) -> Result<Workflow, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse(&json)
}
