//! Local-file closure of the root module

use crate::graph::builder::ModuleGraph;
use std::collections::{HashSet, VecDeque};

/// Computes the set of modules reachable from the root through local imports.
///
/// Breadth-first walk over `local_children` edges with an explicit visited
/// set, so cycles among local files terminate. The root is always in the
/// result. Modules in this set are project files, not dependencies, and are
/// excluded from scoring.
pub fn local_closure(graph: &ModuleGraph) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(graph.root().to_string());
    queue.push_back(graph.root());

    while let Some(specifier) = queue.pop_front() {
        let Some(node) = graph.node(specifier) else {
            continue;
        };
        for child in &node.local_children {
            if visited.insert(child.clone()) {
                queue.push_back(child);
            }
        }
    }

    visited
}
