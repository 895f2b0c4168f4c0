// Lazily materialized tile store — the map's spatial truth.
//
// The dungeon is unbounded: any coordinate can be asked about, and the
// store materializes a floor/wall classification on first contact,
// memoizing it forever. `Unexplored` is simply absence from the memo table,
// never a stored value. The designated origin is always forced floor.
//
// Storage is an `FxHashMap` keyed directly by `TileCoord` — iteration order
// is never observed, so hash order cannot leak into behavior. The
// deterministic part is the *materialization order*: `ensure_region` walks
// its square row-major (increasing y, then x), so a fixed seed and a fixed
// sequence of calls reproduce the same map exactly.
//
// The store grows monotonically with explored area and is never pruned.
// Accepted for bounded play sessions; long-running deployments would need
// an eviction story this design deliberately omits.
//
// See also: `session.rs`, which feeds every newly classified floor tile
// into the connectivity graph (`graph.rs`).

use crate::config::CrawlConfig;
use crate::prng::CrawlRng;
use crate::types::{Tile, TileCoord};
use rustc_hash::FxHashMap;

/// Memoizing floor/wall classifier for the unbounded grid.
#[derive(Clone, Debug)]
pub struct TileStore {
    tiles: FxHashMap<TileCoord, Tile>,
    rng: CrawlRng,
    wall_density: f64,
    origin: TileCoord,
}

impl TileStore {
    /// Create an empty store drawing from a freshly seeded PRNG.
    pub fn new(seed: u64, config: &CrawlConfig) -> Self {
        Self {
            tiles: FxHashMap::default(),
            rng: CrawlRng::new(seed),
            wall_density: config.wall_density,
            origin: config.origin,
        }
    }

    /// Peek at a coordinate without materializing it.
    /// Returns `Unexplored` for anything not yet classified.
    pub fn get(&self, coord: TileCoord) -> Tile {
        self.tiles.get(&coord).copied().unwrap_or(Tile::Unexplored)
    }

    /// Classify a coordinate, materializing it on first contact.
    ///
    /// The first call draws one wall/floor decision from the PRNG (the
    /// origin skips the draw and is always floor); every later call returns
    /// the memoized result without touching the PRNG.
    pub fn classify(&mut self, coord: TileCoord) -> Tile {
        if let Some(&tile) = self.tiles.get(&coord) {
            return tile;
        }
        let tile = if coord == self.origin {
            Tile::Floor
        } else if self.rng.random_bool(self.wall_density) {
            Tile::Wall
        } else {
            Tile::Floor
        };
        self.tiles.insert(coord, tile);
        tile
    }

    /// Materialize the full Chebyshev square of the given radius around
    /// `center`, skipping coordinates already classified.
    ///
    /// Walks row-major (increasing y, then increasing x) so the PRNG is
    /// consumed in a fixed order. Returns the newly classified **floor**
    /// coordinates in that same order, for the caller to feed into graph
    /// construction. Radius 0 materializes just `center`; a negative radius
    /// materializes nothing.
    pub fn ensure_region(&mut self, center: TileCoord, radius: i32) -> Vec<TileCoord> {
        let mut new_floor = Vec::new();
        for y in (center.y - radius)..=(center.y + radius) {
            for x in (center.x - radius)..=(center.x + radius) {
                let coord = TileCoord::new(x, y);
                if self.tiles.contains_key(&coord) {
                    continue;
                }
                if self.classify(coord) == Tile::Floor {
                    new_floor.push(coord);
                }
            }
        }
        new_floor
    }

    /// Number of coordinates materialized so far.
    pub fn explored_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of materialized floor tiles.
    pub fn floor_count(&self) -> usize {
        self.tiles.values().filter(|t| **t == Tile::Floor).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(seed: u64) -> TileStore {
        TileStore::new(seed, &CrawlConfig::default())
    }

    #[test]
    fn unexplored_until_classified() {
        let mut s = store(1);
        let coord = TileCoord::new(7, -3);
        assert_eq!(s.get(coord), Tile::Unexplored);
        let tile = s.classify(coord);
        assert_ne!(tile, Tile::Unexplored);
        assert_eq!(s.get(coord), tile);
    }

    #[test]
    fn classification_is_memoized() {
        let mut s = store(2);
        let coord = TileCoord::new(3, 3);
        let first = s.classify(coord);
        // Re-classifying must not re-roll, even after unrelated draws.
        s.ensure_region(TileCoord::new(50, 50), 4);
        assert_eq!(s.classify(coord), first);
    }

    #[test]
    fn origin_is_always_floor() {
        for seed in 0..32 {
            let mut s = store(seed);
            assert_eq!(s.classify(TileCoord::new(0, 0)), Tile::Floor);
        }
    }

    #[test]
    fn ensure_region_covers_the_square() {
        let mut s = store(3);
        let center = TileCoord::new(2, -1);
        s.ensure_region(center, 2);
        for y in -3..=1 {
            for x in 0..=4 {
                assert_ne!(s.get(TileCoord::new(x, y)), Tile::Unexplored);
            }
        }
        assert_eq!(s.explored_count(), 25);
    }

    #[test]
    fn ensure_region_reports_only_new_floor() {
        let mut s = store(4);
        let first = s.ensure_region(TileCoord::new(0, 0), 2);
        assert!(first.iter().all(|&c| s.get(c) == Tile::Floor));
        // Same region again: everything is memoized, nothing is new.
        assert!(s.ensure_region(TileCoord::new(0, 0), 2).is_empty());
        // Overlapping region reports only the fresh rim.
        let second = s.ensure_region(TileCoord::new(1, 0), 2);
        assert!(first.iter().all(|c| !second.contains(c)));
    }

    #[test]
    fn ensure_region_order_is_row_major() {
        let config = CrawlConfig {
            wall_density: 0.0,
            ..CrawlConfig::default()
        };
        let mut s = TileStore::new(5, &config);
        let floors = s.ensure_region(TileCoord::new(0, 0), 1);
        let expected: Vec<TileCoord> = (-1..=1)
            .flat_map(|y| (-1..=1).map(move |x| TileCoord::new(x, y)))
            .collect();
        assert_eq!(floors, expected);
    }

    #[test]
    fn negative_radius_materializes_nothing() {
        let mut s = store(6);
        assert!(s.ensure_region(TileCoord::new(0, 0), -1).is_empty());
        assert_eq!(s.explored_count(), 0);
    }

    #[test]
    fn same_seed_same_map() {
        let mut a = store(99);
        let mut b = store(99);
        a.ensure_region(TileCoord::new(0, 0), 6);
        b.ensure_region(TileCoord::new(0, 0), 6);
        for y in -6..=6 {
            for x in -6..=6 {
                let c = TileCoord::new(x, y);
                assert_eq!(a.get(c), b.get(c), "mismatch at {c}");
            }
        }
    }

    #[test]
    fn wall_density_extremes() {
        let solid_config = CrawlConfig {
            wall_density: 1.0,
            ..CrawlConfig::default()
        };
        let mut solid = TileStore::new(10, &solid_config);
        // Only the origin comes back as floor.
        assert_eq!(
            solid.ensure_region(TileCoord::new(0, 0), 3),
            vec![TileCoord::new(0, 0)]
        );
        assert_eq!(solid.floor_count(), 1);
        assert_eq!(solid.explored_count(), 49);

        let open_config = CrawlConfig {
            wall_density: 0.0,
            ..CrawlConfig::default()
        };
        let mut open = TileStore::new(10, &open_config);
        assert_eq!(open.ensure_region(TileCoord::new(0, 0), 3).len(), 49);
    }
}
