// Dijkstra shortest path over the connectivity graph.
//
// Classic single-source search, implemented with a `BinaryHeap` open set
// (min-heap via reversed ordering). Every edge costs exactly 1, so
// distances are plain tile counts. The heap variant visits nodes in
// nondecreasing distance order and settles ties on the smaller node id —
// creation order — so results are fully deterministic against a frozen
// graph.
//
// An unreachable destination is a normal outcome, reported as `None`,
// never an error.
//
// See also: `graph.rs` for the `TileGraph` being searched, `session.rs`
// which translates coordinate queries into node-id queries.

use crate::graph::TileGraph;
use crate::types::NodeId;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// The result of a successful shortest-path search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    /// Node ids from source to destination, inclusive of both endpoints.
    pub nodes: Vec<NodeId>,
    /// Number of edges walked (`nodes.len() - 1`).
    pub total_cost: u32,
}

/// Entry in the open set (min-heap via reversed ordering).
#[derive(PartialEq, Eq)]
struct OpenEntry {
    node: NodeId,
    dist: u32,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest distance is "greatest",
        // ties broken by smaller node id (creation order).
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.node.0.cmp(&self.node.0))
    }
}

/// Find the shortest route from `source` to `dest`.
///
/// Returns `None` when no route exists or when either endpoint is not a
/// live node. The returned node sequence runs **source → destination** —
/// predecessors are walked back from the destination and reversed here, so
/// callers never deal with a back-to-front route.
pub fn dijkstra(graph: &TileGraph, source: NodeId, dest: NodeId) -> Option<PathResult> {
    if !graph.contains(source) || !graph.contains(dest) {
        return None;
    }
    if source == dest {
        return Some(PathResult {
            nodes: vec![source],
            total_cost: 0,
        });
    }

    let mut dist: BTreeMap<NodeId, u32> = BTreeMap::new();
    let mut came_from: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut settled: BTreeSet<NodeId> = BTreeSet::new();

    dist.insert(source, 0);
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        node: source,
        dist: 0,
    });

    while let Some(current) = open.pop() {
        if current.node == dest {
            return Some(reconstruct(&came_from, source, dest, current.dist));
        }
        if !settled.insert(current.node) {
            continue; // stale heap entry for an already-settled node
        }

        for &neighbor in graph.node(current.node).neighbors() {
            if settled.contains(&neighbor) {
                continue;
            }
            let tentative = current.dist + 1;
            if dist.get(&neighbor).is_none_or(|&known| tentative < known) {
                dist.insert(neighbor, tentative);
                came_from.insert(neighbor, current.node);
                open.push(OpenEntry {
                    node: neighbor,
                    dist: tentative,
                });
            }
        }
    }

    None // destination unreachable
}

/// Walk predecessor links destination → source, then reverse.
fn reconstruct(
    came_from: &BTreeMap<NodeId, NodeId>,
    source: NodeId,
    dest: NodeId,
    total_cost: u32,
) -> PathResult {
    let mut nodes = vec![dest];
    let mut current = dest;
    while current != source {
        current = came_from[&current];
        nodes.push(current);
    }
    nodes.reverse();
    PathResult { nodes, total_cost }
}
