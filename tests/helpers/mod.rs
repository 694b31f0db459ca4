use serde_json::{Value, json};

use validator::parse::types::Workflow;
use validator::schema::SchemaRegistry;
use validator::validate::Validator;

// =============================================================================
// Registry builders
// =============================================================================

/// A small operator registry covering the type shapes the validator cares
/// about: enums, bounded scalars, connection slots, wildcards, and a
/// GPU-flavored sampler.
pub fn object_info() -> Value {
    json!({
        "LoadImage": {
            "input": {
                "required": {
                    "image": [["example.png", "other.png"]]
                }
            },
            "output": ["IMAGE", "MASK"]
        },
        "LoadModel": {
            "input": {
                "required": {
                    "name": [["model_a", "model_b"]]
                }
            },
            "output": ["MODEL"]
        },
        "TextEncode": {
            "input": {
                "required": {
                    "text": ["STRING"]
                },
                "optional": {
                    "normalize": ["BOOLEAN"]
                }
            },
            "output": ["CONDITIONING"]
        },
        "ImageBlur": {
            "input": {
                "required": {
                    "image": ["IMAGE"],
                    "radius": ["INT", {"min": 0, "max": 10}]
                }
            },
            "output": ["IMAGE"]
        },
        "Sampler": {
            "input": {
                "required": {
                    "model": ["MODEL"],
                    "conditioning": ["CONDITIONING"],
                    "steps": ["INT", {"min": 1, "max": 100}],
                    "cfg": ["FLOAT", {"min": 0.0, "max": 30.0}]
                }
            },
            "output": ["IMAGE"]
        },
        "MaskInvert": {
            "input": {
                "required": {
                    "mask": ["MASK"]
                }
            },
            "output": ["MASK"]
        },
        "Passthrough": {
            "input": {
                "required": {
                    "value": ["*"]
                }
            },
            "output": ["*"]
        },
        "SaveImage": {
            "input": {
                "required": {
                    "image": ["IMAGE"],
                    "filename": ["STRING"]
                }
            },
            "output": []
        }
    })
}

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::from_object_info(&object_info())
}

pub fn validator() -> Validator {
    Validator::new(registry())
}

// =============================================================================
// Workflow builders
// =============================================================================

/// Deserialize a workflow from a `json!` literal.
pub fn workflow(doc: Value) -> Workflow {
    serde_json::from_value(doc).expect("workflow literal should deserialize")
}

/// Single-node workflow with the given widget values and no links.
pub fn single_node(node_type: &str, widgets: Value) -> Workflow {
    workflow(json!({
        "nodes": [{"id": 1, "type": node_type, "widgets_values": widgets}],
        "links": []
    }))
}
