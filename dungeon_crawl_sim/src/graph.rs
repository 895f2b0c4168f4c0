// Connectivity graph over floor tiles.
//
// Nodes are floor coordinates; edges connect axis-aligned adjacent floor
// tiles with implicit unit weight. The graph is built eagerly at generation
// time: the session promotes each newly classified floor tile to a node and
// wires it immediately, so path queries never have to discover adjacency
// themselves.
//
// Nodes live in a `BTreeMap<NodeId, GraphNode>` — deterministic iteration
// in id order (which is creation order, since ids are sequential and never
// reused), and it survives removal, unlike a `Vec` indexed by id. A second
// `BTreeMap` indexes coordinates back to ids. Adjacency is stored
// symmetrically as a `SmallVec<[NodeId; 4]>` per node; a grid tile has at
// most four neighbors, so the list never spills to the heap.
//
// Duplicate node insertion, self-loops, and dangling edge endpoints are
// programming errors, not recoverable conditions: they fail loudly via
// `debug_assert!` in debug/test builds.
//
// See also: `pathfinding.rs` for Dijkstra over this graph, `session.rs`
// which keeps the graph consistent with the tile store.

use crate::types::{NodeId, TileCoord};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A node in the connectivity graph — one walkable floor tile.
#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: NodeId,
    pub coord: TileCoord,
    neighbors: SmallVec<[NodeId; 4]>,
}

impl GraphNode {
    /// Ids of the nodes this one shares an edge with.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// The connectivity graph container.
#[derive(Clone, Debug, Default)]
pub struct TileGraph {
    nodes: BTreeMap<NodeId, GraphNode>,
    coord_index: BTreeMap<TileCoord, NodeId>,
    next_id: u32,
}

impl TileGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node for a floor coordinate. Returns its id.
    ///
    /// The caller must guarantee the coordinate is not already present;
    /// violating that is a logic error and trips a `debug_assert!`.
    pub fn add_node(&mut self, coord: TileCoord) -> NodeId {
        debug_assert!(
            !self.coord_index.contains_key(&coord),
            "duplicate node for coordinate {coord}"
        );
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            GraphNode {
                id,
                coord,
                neighbors: SmallVec::new(),
            },
        );
        self.coord_index.insert(coord, id);
        id
    }

    /// Wire a freshly inserted node to every existing node at Manhattan
    /// distance 1. Call once per node, immediately after `add_node`, before
    /// any path query observes the graph.
    ///
    /// Adjacency is a pure function of coordinates, so insertion order
    /// never changes which edges exist — only when they appear.
    pub fn connect_if_adjacent(&mut self, id: NodeId) {
        let coord = self.node(id).coord;
        for neighbor_coord in coord.neighbors4() {
            if let Some(&other) = self.coord_index.get(&neighbor_coord) {
                self.add_edge(id, other);
            }
        }
    }

    /// Remove a node and every edge touching it. Returns the removed node,
    /// or `None` if the id is not present. The id is never reused.
    pub fn remove_node(&mut self, id: NodeId) -> Option<GraphNode> {
        let node = self.nodes.remove(&id)?;
        self.coord_index.remove(&node.coord);
        for neighbor in &node.neighbors {
            if let Some(n) = self.nodes.get_mut(neighbor) {
                n.neighbors.retain(|&mut other| other != id);
            }
        }
        Some(node)
    }

    /// Add an undirected unit-weight edge. Both endpoints must exist, be
    /// distinct, and not already be connected — anything else is a logic
    /// error caught in debug builds.
    fn add_edge(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b, "self-loop on node {a:?}");
        debug_assert!(self.nodes.contains_key(&a), "edge endpoint {a:?} missing");
        debug_assert!(self.nodes.contains_key(&b), "edge endpoint {b:?} missing");
        debug_assert!(
            !self.contains_edge(a, b),
            "parallel edge between {a:?} and {b:?}"
        );
        if let Some(node) = self.nodes.get_mut(&a) {
            node.neighbors.push(b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbors.push(a);
        }
    }

    /// Get a node by id. Panics on an id that was never issued or was
    /// removed — callers hold ids they got from this graph.
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[&id]
    }

    /// Whether the id currently names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Look up the node for a coordinate, if that coordinate is a floor tile.
    pub fn node_at(&self, coord: TileCoord) -> Option<NodeId> {
        self.coord_index.get(&coord).copied()
    }

    /// Whether an edge exists between two nodes.
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes.get(&a).is_some_and(|n| n.neighbors.contains(&b))
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Iterate live nodes in id (= creation) order.
    pub fn iter(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_assigns_sequential_ids() {
        let mut graph = TileGraph::new();
        let a = graph.add_node(TileCoord::new(0, 0));
        let b = graph.add_node(TileCoord::new(1, 0));
        let c = graph.add_node(TileCoord::new(5, 5));
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_eq!(c, NodeId(2));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn connect_if_adjacent_wires_all_four_sides() {
        let mut graph = TileGraph::new();
        let center = graph.add_node(TileCoord::new(0, 0));
        let mut ring = Vec::new();
        for coord in TileCoord::new(0, 0).neighbors4() {
            let id = graph.add_node(coord);
            graph.connect_if_adjacent(id);
            ring.push(id);
        }
        for id in ring {
            assert!(graph.contains_edge(center, id));
            assert!(graph.contains_edge(id, center));
        }
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn diagonal_tiles_are_not_connected() {
        let mut graph = TileGraph::new();
        let a = graph.add_node(TileCoord::new(0, 0));
        let b = graph.add_node(TileCoord::new(1, 1));
        graph.connect_if_adjacent(b);
        assert!(!graph.contains_edge(a, b));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn connect_is_insertion_order_independent() {
        // Same three coordinates, two insertion orders, same edges.
        let coords = [
            TileCoord::new(0, 0),
            TileCoord::new(1, 0),
            TileCoord::new(2, 0),
        ];
        let mut forward = TileGraph::new();
        for &c in &coords {
            let id = forward.add_node(c);
            forward.connect_if_adjacent(id);
        }
        let mut reverse = TileGraph::new();
        for &c in coords.iter().rev() {
            let id = reverse.add_node(c);
            reverse.connect_if_adjacent(id);
        }
        assert_eq!(forward.edge_count(), 2);
        assert_eq!(reverse.edge_count(), 2);
    }

    #[test]
    #[should_panic(expected = "duplicate node")]
    #[cfg(debug_assertions)]
    fn duplicate_coordinate_fails_loudly() {
        let mut graph = TileGraph::new();
        graph.add_node(TileCoord::new(0, 0));
        graph.add_node(TileCoord::new(0, 0));
    }

    #[test]
    fn remove_node_detaches_edges() {
        let mut graph = TileGraph::new();
        let a = graph.add_node(TileCoord::new(0, 0));
        let b = graph.add_node(TileCoord::new(1, 0));
        graph.connect_if_adjacent(b);
        let c = graph.add_node(TileCoord::new(2, 0));
        graph.connect_if_adjacent(c);

        let removed = graph.remove_node(b).expect("b exists");
        assert_eq!(removed.coord, TileCoord::new(1, 0));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.node(a).neighbors().is_empty());
        assert!(graph.node(c).neighbors().is_empty());
        assert_eq!(graph.node_at(TileCoord::new(1, 0)), None);
    }

    #[test]
    fn remove_missing_node_reports_none() {
        let mut graph = TileGraph::new();
        graph.add_node(TileCoord::new(0, 0));
        assert!(graph.remove_node(NodeId(7)).is_none());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut graph = TileGraph::new();
        let a = graph.add_node(TileCoord::new(0, 0));
        graph.remove_node(a);
        let b = graph.add_node(TileCoord::new(0, 0));
        assert_ne!(a, b);
        assert_eq!(b, NodeId(1));
    }

    #[test]
    fn iteration_follows_creation_order() {
        let mut graph = TileGraph::new();
        graph.add_node(TileCoord::new(9, 9));
        graph.add_node(TileCoord::new(-3, 0));
        graph.add_node(TileCoord::new(0, 1));
        let ids: Vec<NodeId> = graph.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NodeId(0), NodeId(1), NodeId(2)]);
    }
}
