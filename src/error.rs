//! Error types shared across validation phases.

use serde::Serialize;

/// Which validation phase produced a finding.
///
/// Closed set: callers switch on this when deciding whether a finding is
/// fatal (schema/graph) or advisory (execution warnings during a partial run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Schema,
    Graph,
    Introspection,
    Execution,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Schema => write!(f, "schema"),
            Level::Graph => write!(f, "graph"),
            Level::Introspection => write!(f, "introspection"),
            Level::Execution => write!(f, "execution"),
        }
    }
}

/// A single validation finding, attributed to the node it concerns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub node_id: i64,
    pub node_type: String,
    pub message: String,
    pub level: Level,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] Node {} ({}): {}",
            self.level, self.node_id, self.node_type, self.message
        )
    }
}

impl ValidationError {
    pub fn schema(node_id: i64, node_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(node_id, node_type, message, Level::Schema)
    }

    pub fn graph(node_id: i64, node_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(node_id, node_type, message, Level::Graph)
    }

    pub fn introspection(
        node_id: i64,
        node_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(node_id, node_type, message, Level::Introspection)
    }

    pub fn execution(
        node_id: i64,
        node_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(node_id, node_type, message, Level::Execution)
    }

    fn new(
        node_id: i64,
        node_type: impl Into<String>,
        message: impl Into<String>,
        level: Level,
    ) -> Self {
        ValidationError {
            node_id,
            node_type: node_type.into(),
            message: message.into(),
            level,
        }
    }
}

/// Failure to read or decode a workflow document.
///
/// Malformed top-level input is the caller's concern; `validate()` itself
/// never returns these.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read workflow file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse workflow JSON: {0}")]
    Json(#[from] serde_json::Error),
}
