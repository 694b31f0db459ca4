//! Read-only adapter over the application's operator schema registry.
//!
//! The raw document comes from the server's introspection endpoint as a
//! mapping of operator name → `{input: {required, optional}, output: [...]}`.
//! Live servers ship plenty of irregular entries, so construction is
//! tolerant: malformed input specs are dropped rather than rejected, which
//! also keeps them out of the positional widget/slot bookkeeping.

pub mod types;

pub use types::*;

use std::collections::HashMap;

use serde_json::Value;

pub struct SchemaRegistry {
    operators: HashMap<String, OperatorSpec>,
}

impl SchemaRegistry {
    /// Build a registry from the raw introspection document. Entries that are
    /// not objects are skipped.
    pub fn from_object_info(info: &Value) -> Self {
        let mut operators = HashMap::new();

        if let Some(entries) = info.as_object() {
            for (name, raw) in entries {
                let Some(raw) = raw.as_object() else { continue };
                operators.insert(name.clone(), parse_operator(raw));
            }
        }

        SchemaRegistry { operators }
    }

    pub fn lookup(&self, type_name: &str) -> Option<&OperatorSpec> {
        self.operators.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.operators.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

fn parse_operator(raw: &serde_json::Map<String, Value>) -> OperatorSpec {
    let inputs = raw.get("input").and_then(Value::as_object);
    let required = inputs
        .and_then(|i| i.get("required"))
        .map(parse_inputs)
        .unwrap_or_default();
    let optional = inputs
        .and_then(|i| i.get("optional"))
        .map(parse_inputs)
        .unwrap_or_default();

    let outputs = raw
        .get("output")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                // Non-string output entries (inline combo lists) carry no
                // usable type name; keep the slot index and treat them as
                // unconstrained.
                .map(|v| v.as_str().unwrap_or("*").to_owned())
                .collect()
        })
        .unwrap_or_default();

    OperatorSpec {
        required,
        optional,
        outputs,
    }
}

/// Decode one `required`/`optional` map, preserving declaration order.
///
/// Each entry is `name: [type_or_enum, options?]`. Entries that are not
/// non-empty arrays, or whose first element is neither a string nor a list,
/// are dropped: they neither consume a widget value nor count as a
/// connection slot.
fn parse_inputs(raw: &Value) -> Vec<(String, InputSpec)> {
    let Some(map) = raw.as_object() else {
        return Vec::new();
    };

    let mut inputs = Vec::with_capacity(map.len());
    for (name, spec) in map {
        let Some(items) = spec.as_array() else { continue };
        let kind = match items.first() {
            Some(Value::String(t)) => InputKind::Type(t.clone()),
            Some(Value::Array(values)) => InputKind::Enum(values.clone()),
            _ => continue,
        };
        let options = items
            .get(1)
            .and_then(Value::as_object)
            .map(parse_options)
            .unwrap_or_default();
        inputs.push((name.clone(), InputSpec { kind, options }));
    }
    inputs
}

fn parse_options(raw: &serde_json::Map<String, Value>) -> InputOptions {
    InputOptions {
        min: number_opt(raw.get("min")),
        max: number_opt(raw.get("max")),
    }
}

fn number_opt(value: Option<&Value>) -> Option<serde_json::Number> {
    match value {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}
