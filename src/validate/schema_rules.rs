//! Widget-value checks against operator input specs (schema level).

use serde_json::Value;

use crate::error::ValidationError;
use crate::parse::types::{Node, Workflow};
use crate::schema::{InputKind, InputOptions, InputSpec, OperatorSpec, SchemaRegistry};

/// Check every node's type registration and widget values. Errors are pushed
/// in node iteration order.
pub fn validate_schema(
    workflow: &Workflow,
    registry: &SchemaRegistry,
    errors: &mut Vec<ValidationError>,
) {
    for node in &workflow.nodes {
        let Some(spec) = registry.lookup(&node.node_type) else {
            errors.push(ValidationError::schema(
                node.id,
                &node.node_type,
                format!("Unknown node type: {}", node.node_type),
            ));
            continue;
        };
        validate_widgets(node, spec, errors);
    }
}

/// Bind `widgets_values` positionally to the node's non-connection inputs
/// (required before optional, declaration order) and check each value.
/// Running out of values means the node relies on defaults; that is not an
/// error, binding just stops.
fn validate_widgets(node: &Node, spec: &OperatorSpec, errors: &mut Vec<ValidationError>) {
    let mut values = node.widgets_values.iter();

    for (name, input) in spec.widget_inputs() {
        let Some(value) = values.next() else { break };
        if let Some(message) = check_value(name, input, value) {
            errors.push(ValidationError::schema(node.id, &node.node_type, message));
        }
    }
}

/// Validate one widget value against its spec. Returns the error message if
/// invalid.
fn check_value(name: &str, spec: &InputSpec, value: &Value) -> Option<String> {
    match &spec.kind {
        InputKind::Enum(allowed) => {
            if !allowed.contains(value) {
                return Some(format!(
                    "'{}': '{}' not in allowed values {}",
                    name,
                    fmt_value(value),
                    Value::Array(allowed.clone())
                ));
            }
            None
        }
        InputKind::Type(declared) => match declared.as_str() {
            "INT" | "FLOAT" => check_numeric(name, declared, value, &spec.options),
            "STRING" => (!value.is_string())
                .then(|| format!("'{}': expected STRING, got {}", name, json_type(value))),
            "BOOLEAN" => (!value.is_boolean())
                .then(|| format!("'{}': expected BOOLEAN, got {}", name, json_type(value))),
            // Unrecognized widget types pass through unchecked.
            _ => None,
        },
    }
}

fn check_numeric(name: &str, declared: &str, value: &Value, opts: &InputOptions) -> Option<String> {
    let Some(n) = value.as_f64() else {
        return Some(format!(
            "'{}': expected {}, got {}",
            name,
            declared,
            json_type(value)
        ));
    };

    if let Some(min) = &opts.min {
        if min.as_f64().is_some_and(|m| n < m) {
            return Some(format!("'{}': {} < minimum {}", name, fmt_value(value), min));
        }
    }
    if let Some(max) = &opts.max {
        if max.as_f64().is_some_and(|m| n > m) {
            return Some(format!("'{}': {} > maximum {}", name, fmt_value(value), max));
        }
    }
    None
}

/// Render a widget value for an error message. Strings are shown bare (the
/// surrounding message already quotes them).
fn fmt_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
