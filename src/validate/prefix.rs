//! GPU-dependency closure: which nodes can run without a GPU operator
//! anywhere in their transitive input closure.

use std::collections::HashSet;

use petgraph::visit::Bfs;

use crate::parse::graph::DependencyGraph;
use crate::parse::types::Workflow;

/// Node ids (in original node order) whose dependency closure contains no
/// operator from `gpu_node_types` and that are not GPU operators themselves.
///
/// A node is excluded exactly when it is reachable from some GPU node along
/// data-flow edges, so one traversal per GPU node suffices and cycles
/// terminate (`Bfs` tracks discovered nodes). This over-approximates "can
/// run on CPU": nodes may still fail for unrelated reasons.
pub fn executable_nodes(workflow: &Workflow, gpu_node_types: &HashSet<String>) -> Vec<i64> {
    let deps = DependencyGraph::build(workflow);

    let mut tainted = HashSet::new();
    for node in &workflow.nodes {
        if !gpu_node_types.contains(&node.node_type) {
            continue;
        }
        let Some(&start) = deps.node_indices.get(&node.id) else {
            continue;
        };
        if tainted.contains(&start) {
            continue;
        }
        let mut bfs = Bfs::new(&deps.graph, start);
        while let Some(idx) = bfs.next(&deps.graph) {
            tainted.insert(idx);
        }
    }

    workflow
        .nodes
        .iter()
        .filter(|node| {
            deps.node_indices
                .get(&node.id)
                .is_none_or(|idx| !tainted.contains(idx))
        })
        .map(|node| node.id)
        .collect()
}
