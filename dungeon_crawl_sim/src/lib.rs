// dungeon_crawl_sim — pure Rust dungeon-crawl core.
//
// This crate contains the map, graph, pathfinding, and traversal logic for
// an endless randomly generated dungeon. It has zero rendering dependencies
// and runs headless; the presentation layer (window, camera, input, tile
// drawing) lives outside and talks to `CrawlSession` through plain method
// calls.
//
// Module overview:
// - `session.rs`:     Top-level CrawlSession — owns everything, drives the tick loop.
// - `tiles.rs`:       Lazily materialized, memoized floor/wall tile store.
// - `graph.rs`:       Connectivity graph over floor tiles (unit-weight, undirected).
// - `pathfinding.rs`: Dijkstra shortest path over the tile graph.
// - `traversal.rs`:   Route-following state machine stepped once per cadence.
// - `scheduler.rs`:   Tick-ordered step queue driving traversal.
// - `event.rs`:       CrawlEvent — narrative output for the presentation layer.
// - `config.rs`:      CrawlConfig — all tunable parameters, loaded from JSON.
// - `prng`:           Re-exported from `dungeon_crawl_prng` — xoshiro256++ with SplitMix64 seeding.
// - `types.rs`:       TileCoord, NodeId, Tile.
//
// **Critical constraint: determinism.** For a fixed seed and a fixed order
// of materialization calls, two sessions produce identical maps, graphs,
// and paths. All randomness comes from the seeded PRNG; node iteration uses
// `BTreeMap` and sequential ids, never `HashMap` order.

pub mod config;
pub mod event;
pub mod graph;
pub mod pathfinding;
pub use dungeon_crawl_prng as prng;
pub mod scheduler;
pub mod session;
pub mod tiles;
pub mod traversal;
pub mod types;
