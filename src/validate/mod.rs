//! Workflow validation against a live schema registry.
//!
//! Three passes over the document: widget-value checks (schema level), link
//! checks (graph level), and — only on a clean document — the GPU-dependency
//! closure that yields the executable prefix. The validator is pure
//! computation over its inputs: it never raises for a well-formed-but-invalid
//! graph and holds no state beyond the registry and the injected GPU set.

pub mod graph_rules;
pub mod prefix;
pub mod schema_rules;

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::error::{ParseError, ValidationError};
use crate::parse;
use crate::parse::types::Workflow;
use crate::schema::SchemaRegistry;

/// Outcome of one `validate()` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
    /// Node ids (document order) with no GPU operator in their dependency
    /// closure. Populated only when `errors` is empty.
    pub executable_nodes: Vec<i64>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Validator {
    registry: SchemaRegistry,
    gpu_node_types: HashSet<String>,
}

impl Validator {
    pub fn new(registry: SchemaRegistry) -> Self {
        Validator {
            registry,
            gpu_node_types: HashSet::new(),
        }
    }

    /// Inject the set of operator types that require a GPU. Defaults to
    /// empty, in which case every node is considered executable.
    pub fn with_gpu_node_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gpu_node_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Run all validation passes on a workflow.
    pub fn validate(&self, workflow: &Workflow) -> ValidationResult {
        let mut errors = Vec::new();

        schema_rules::validate_schema(workflow, &self.registry, &mut errors);
        graph_rules::validate_links(workflow, &self.registry, &mut errors);

        let executable_nodes = if errors.is_empty() {
            prefix::executable_nodes(workflow, &self.gpu_node_types)
        } else {
            Vec::new()
        };

        ValidationResult {
            errors,
            warnings: Vec::new(),
            executable_nodes,
        }
    }

    /// Parse and validate a workflow JSON file.
    pub fn validate_file(&self, path: &Path) -> Result<ValidationResult, ParseError> {
        let workflow = parse::parse_file(path)?;
        Ok(self.validate(&workflow))
    }

    /// Check that every expected operator is present in the registry. Used
    /// after plugin installation to confirm registration; one
    /// introspection-level error per missing operator.
    pub fn verify_registered(&self, expected: &[String]) -> Vec<ValidationError> {
        expected
            .iter()
            .filter(|name| !self.registry.contains(name))
            .map(|name| {
                ValidationError::introspection(
                    0,
                    name.clone(),
                    format!("Expected operator '{}' is not registered", name),
                )
            })
            .collect()
    }
}
