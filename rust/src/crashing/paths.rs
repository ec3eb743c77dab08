//! Enumeration of all simple source-to-sink paths.
//!
//! Paths are computed once: crashing changes durations and costs but never
//! the topology, so the enumeration stays valid for the whole run.

use rustc_hash::FxHashSet;

use super::graph::{ActivityKey, ActivityNetwork, EventId};

/// An ordered sequence of activities forming a simple source-to-sink route.
pub type Path = Vec<ActivityKey>;

/// Enumerate every simple directed path from the network's source to its
/// sink, each as an ordered activity sequence.
///
/// Worst case is exponential in the path count; project networks are sparse
/// enough that this is acceptable.
pub fn find_all_simple_paths(network: &ActivityNetwork) -> Vec<Path> {
    let mut paths = Vec::new();
    let mut visited = FxHashSet::default();
    let mut current = Vec::new();
    extend_path(
        network,
        network.source(),
        network.sink(),
        &mut visited,
        &mut current,
        &mut paths,
    );
    paths
}

fn extend_path(
    network: &ActivityNetwork,
    node: EventId,
    sink: EventId,
    visited: &mut FxHashSet<EventId>,
    current: &mut Path,
    paths: &mut Vec<Path>,
) {
    if node == sink {
        paths.push(current.clone());
        return;
    }
    visited.insert(node);
    for &next in network.successors(node) {
        if visited.contains(&next) {
            continue;
        }
        current.push((node, next));
        extend_path(network, next, sink, visited, current, paths);
        current.pop();
    }
    visited.remove(&node);
}
