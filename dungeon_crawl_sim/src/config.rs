// Data-driven session configuration.
//
// All tunable parameters live in `CrawlConfig`, loaded from JSON at startup
// and never mutated at runtime. The sim reads from the config instead of
// using magic numbers, so density and cadence can be tuned without
// recompiling.
//
// **Critical constraint: determinism.** Config values feed directly into
// tile generation; two sessions must use identical configs (and seeds) to
// produce identical maps.

use crate::types::TileCoord;
use serde::{Deserialize, Serialize};

/// Top-level session configuration. Loaded from JSON, never mutated at runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Probability a freshly materialized tile is a wall. 0.0 = open field,
    /// 1.0 = solid rock (except the origin, which is always floor).
    pub wall_density: f64,

    /// Chebyshev radius materialized around the origin at session creation.
    pub initial_radius: i32,

    /// Chebyshev radius materialized around the agent after every step or
    /// direct move, so the agent never walks into unmaterialized territory.
    pub movement_radius: i32,

    /// Number of real-world milliseconds per simulation tick. The core
    /// never reads this — it is metadata for the presentation layer, which
    /// owns wall-clock time and decides how often to call `advance`.
    pub tick_duration_ms: u32,

    /// Ticks between traversal steps while following a route. With 1 ms
    /// ticks the default is one tile every 0.15 s. A pacing knob, not a
    /// correctness constraint.
    pub step_interval_ticks: u64,

    /// The designated origin coordinate. Always forced floor so a fresh
    /// session starts on walkable ground.
    pub origin: TileCoord,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            wall_density: 0.30,
            initial_radius: 3,
            movement_radius: 2,
            tick_duration_ms: 1,
            step_interval_ticks: 150,
            origin: TileCoord::new(0, 0),
        }
    }
}

impl CrawlConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
