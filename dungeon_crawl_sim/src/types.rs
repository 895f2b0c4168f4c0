// Core types shared across the crate.
//
// `TileCoord` is the structural map key: a plain integer pair with `Hash`
// and a total order, usable in both hash maps and `BTreeMap`s. Node ids are
// compact sequential integers (`NodeId`), assigned at node creation and
// never reused.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the unbounded 2D tile grid, in whole tiles.
///
/// X grows east, Y grows north. The grid has no edges — any `i32` pair is
/// a valid coordinate, explored or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// The four axis-aligned neighbors, in fixed N/E/S/W order.
    pub const fn neighbors4(self) -> [Self; 4] {
        [
            self.offset(0, 1),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(-1, 0),
        ]
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compact identifier for a connectivity-graph node. Sequential, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Classification of one grid coordinate.
///
/// `Unexplored` is never stored — it is the computed answer for any
/// coordinate the tile store has not materialized yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
    Unexplored,
}

impl Tile {
    /// Whether an agent can stand on this tile.
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }
}
