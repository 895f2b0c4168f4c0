// Narrative events emitted by the session.
//
// The core never logs; like the rest of the sim it stays a pure function
// of its inputs. Everything the presentation layer might want to react to
// (flash the new tiles, animate the agent, clear the destination marker)
// comes out of `CrawlSession::advance()` as a `CrawlEvent` list instead.

use crate::types::TileCoord;
use serde::{Deserialize, Serialize};

/// Something observable that happened at a given tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlEvent {
    pub tick: u64,
    pub kind: CrawlEventKind,
}

/// The kinds of event the session emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrawlEventKind {
    /// The agent stepped onto a tile while following a route.
    AgentStepped { to: TileCoord },
    /// A step grew the map around the agent; `new_floor` counts the floor
    /// tiles that did not exist before.
    RegionMaterialized { center: TileCoord, new_floor: usize },
    /// The in-flight route was consumed to the end.
    RouteCompleted,
}
