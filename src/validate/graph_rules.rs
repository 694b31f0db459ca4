//! Link checks: endpoint existence and slot type compatibility (graph level).

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::parse::types::{Link, Node, Workflow};
use crate::schema::SchemaRegistry;

/// Check every well-formed link. Errors are pushed in link iteration order.
/// Links with fewer than 6 elements (or non-integer fields) never reach this
/// point; `Workflow::parsed_links` drops them.
pub fn validate_links(
    workflow: &Workflow,
    registry: &SchemaRegistry,
    errors: &mut Vec<ValidationError>,
) {
    let nodes_by_id: HashMap<i64, &Node> =
        workflow.nodes.iter().map(|n| (n.id, n)).collect();

    for link in workflow.parsed_links() {
        let Some(&from) = nodes_by_id.get(&link.from_node) else {
            errors.push(ValidationError::graph(
                link.from_node,
                "unknown",
                format!(
                    "Link {}: source node {} does not exist",
                    link.id, link.from_node
                ),
            ));
            continue;
        };
        let Some(&to) = nodes_by_id.get(&link.to_node) else {
            errors.push(ValidationError::graph(
                link.to_node,
                "unknown",
                format!(
                    "Link {}: target node {} does not exist",
                    link.id, link.to_node
                ),
            ));
            continue;
        };

        // Unknown endpoint types were already flagged by the schema pass;
        // only typed endpoints get a connection check.
        if registry.contains(&from.node_type) && registry.contains(&to.node_type) {
            if let Some(message) = check_connection(from, to, &link, registry) {
                errors.push(ValidationError::graph(to.id, &to.node_type, message));
            }
        }
    }
}

/// Resolve both slot types and compare them. Strict: equal or wildcard on
/// either side passes, nothing else. The host application's richer coercion
/// table is intentionally not modeled.
fn check_connection(
    from: &Node,
    to: &Node,
    link: &Link,
    registry: &SchemaRegistry,
) -> Option<String> {
    let from_spec = registry.lookup(&from.node_type)?;
    let to_spec = registry.lookup(&to.node_type)?;

    let output_type = match usize::try_from(link.from_slot)
        .ok()
        .and_then(|slot| from_spec.outputs.get(slot))
    {
        Some(t) => t.as_str(),
        None => {
            return Some(format!(
                "Output slot {} does not exist on {}",
                link.from_slot, from.node_type
            ));
        }
    };

    let input_type = match usize::try_from(link.to_slot)
        .ok()
        .and_then(|slot| to_spec.connection_inputs().nth(slot))
    {
        Some((_, t)) => t,
        None => {
            return Some(format!(
                "Input slot {} does not exist on {}",
                link.to_slot, to.node_type
            ));
        }
    };

    if output_type != input_type && output_type != "*" && input_type != "*" {
        return Some(format!(
            "Type mismatch: {} outputs {}, but {} expects {}",
            from.node_type, output_type, to.node_type, input_type
        ));
    }
    None
}
