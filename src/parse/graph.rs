//! petgraph-based dependency graph over workflow node ids.
//!
//! Edges follow data flow: `from_node -> to_node` for every well-formed link
//! whose endpoints both exist. Dangling links are the graph validator's
//! business, not this builder's, so they are skipped here rather than
//! rejected.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::types::Workflow;

pub struct DependencyGraph {
    pub graph: DiGraph<i64, ()>,
    pub node_indices: HashMap<i64, NodeIndex>,
}

impl DependencyGraph {
    pub fn build(workflow: &Workflow) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in &workflow.nodes {
            let idx = graph.add_node(node.id);
            node_indices.insert(node.id, idx);
        }

        for link in workflow.parsed_links() {
            if let (Some(&from), Some(&to)) = (
                node_indices.get(&link.from_node),
                node_indices.get(&link.to_node),
            ) {
                graph.add_edge(from, to, ());
            }
        }

        DependencyGraph {
            graph,
            node_indices,
        }
    }

    pub fn contains(&self, node_id: i64) -> bool {
        self.node_indices.contains_key(&node_id)
    }
}
