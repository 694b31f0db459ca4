//! Typed view of an operator's input/output schema.

use serde_json::{Number, Value};

/// Input/output specification for one operator type.
///
/// `required` and `optional` keep the registry's declaration order; positional
/// widget binding and connection-slot indexing both depend on it.
#[derive(Debug, Clone, Default)]
pub struct OperatorSpec {
    pub required: Vec<(String, InputSpec)>,
    pub optional: Vec<(String, InputSpec)>,
    pub outputs: Vec<String>,
}

impl OperatorSpec {
    /// All inputs in binding order: required first, then optional.
    pub fn all_inputs(&self) -> impl Iterator<Item = (&str, &InputSpec)> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(|(name, spec)| (name.as_str(), spec))
    }

    /// Non-connection inputs in binding order. These are the inputs that
    /// consume `widgets_values` entries.
    pub fn widget_inputs(&self) -> impl Iterator<Item = (&str, &InputSpec)> {
        self.all_inputs().filter(|(_, spec)| !spec.is_connection())
    }

    /// Connection-typed inputs in binding order, enumerable by slot index.
    pub fn connection_inputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.all_inputs().filter_map(|(name, spec)| match &spec.kind {
            InputKind::Type(t) if is_connection_type(t) => Some((name, t.as_str())),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct InputSpec {
    pub kind: InputKind,
    pub options: InputOptions,
}

impl InputSpec {
    pub fn is_connection(&self) -> bool {
        matches!(&self.kind, InputKind::Type(t) if is_connection_type(t))
    }
}

/// Declared input type: either a named type token or a list of literal enum
/// values.
#[derive(Debug, Clone)]
pub enum InputKind {
    Type(String),
    Enum(Vec<Value>),
}

/// Recognized per-input options. Anything else the registry declares
/// (defaults, step, tooltips) is ignored.
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    pub min: Option<Number>,
    pub max: Option<Number>,
}

/// Whether a declared type token names a connection (a typed data link
/// between node slots) rather than a literal widget.
///
/// Connection types are the uppercase tokens (`IMAGE`, `CLIP_VISION`, ...)
/// plus the wildcard `*`. The widget scalars `INT`/`FLOAT`/`STRING`/`BOOLEAN`
/// are uppercase too but bind literal values, so they are excluded.
pub fn is_connection_type(name: &str) -> bool {
    if matches!(name, "INT" | "FLOAT" | "STRING" | "BOOLEAN") {
        return false;
    }
    if name == "*" {
        return true;
    }
    let mut has_alpha = false;
    for c in name.chars() {
        if c.is_ascii_lowercase() {
            return false;
        }
        if c.is_ascii_alphabetic() {
            has_alpha = true;
        }
    }
    has_alpha
}
