// Top-level session context and tick loop.
//
// `CrawlSession` owns everything for one play session: the tile store, the
// connectivity graph, the traversal controller, the step scheduler, and the
// agent's position. There are no ambient statics — the presentation layer
// holds one session and calls into it.
//
// The session is the only place where the tile store and the graph meet:
// every materialization goes through `ensure_region()`, which promotes each
// newly classified floor tile to a graph node and wires it immediately.
// That keeps the graph–tile bijection intact at every intermediate state,
// so a path query is valid the moment generation returns.
//
// ## Click flow
//
// `request_move_to()` classifies the click: a wall or unexplored tile is a
// `NotWalkable` no-action outcome, an unreachable floor tile is `NoPath`,
// and a reachable one starts a route and schedules the first `AgentStep`
// at `tick + step_interval_ticks`. `advance()` then drains due steps: each
// one pops the next route node, moves the agent, grows the map around it
// (radius `movement_radius`), and reschedules while the route lasts. The
// move and its region growth happen inside one `step_once()` call — a
// caller can never observe a half-applied step.
//
// Cancellation (explicit `cancel_following()` or an implicit replace via a
// new `request_move_to()`) bumps the route generation; steps already in
// the scheduler carry the old generation and are dropped when popped.
//
// ## Direct movement
//
// `move_agent()` is the keyboard path: one axis-aligned step onto a
// materialized floor tile, cancelling any route in flight, growing the map
// around the new position just like a route step.
//
// **Critical constraint: determinism.** One seed + one call sequence =
// one map, one graph, one set of paths. All mutation happens on the
// caller's thread; a path query always observes a frozen graph.

use crate::config::CrawlConfig;
use crate::event::{CrawlEvent, CrawlEventKind};
use crate::graph::TileGraph;
use crate::pathfinding;
use crate::scheduler::{StepKind, TickScheduler};
use crate::tiles::TileStore;
use crate::traversal::{StepOutcome, TraversalController};
use crate::types::{Tile, TileCoord};

/// Outcome of a move request (a "click"). All variants are normal results;
/// none is an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRequest {
    /// A route of `length` steps was planned and is now being followed.
    RouteStarted { length: usize },
    /// The target is the agent's current tile; nothing to do.
    AlreadyThere,
    /// The target is not a floor tile (wall or unexplored); no action.
    NotWalkable { tile: Tile },
    /// The target is floor but no route exists through explored terrain.
    NoPath,
}

/// One play session: map, graph, agent, and the tick loop that moves them.
#[derive(Clone, Debug)]
pub struct CrawlSession {
    /// Current simulation tick.
    pub tick: u64,
    /// Session configuration (immutable after creation).
    pub config: CrawlConfig,
    /// Memoized floor/wall classification of every explored coordinate.
    pub tiles: TileStore,
    /// Connectivity graph over floor tiles, kept in lockstep with `tiles`.
    pub graph: TileGraph,
    /// Route consumption state machine.
    pub traversal: TraversalController,
    /// Pending traversal steps, ordered by tick.
    pub scheduler: TickScheduler,
    /// The agent's current tile. Always a materialized floor tile.
    pub agent: TileCoord,
}

impl CrawlSession {
    /// Create a session with the default config.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, CrawlConfig::default())
    }

    /// Create a session, materialize the starting area around the origin,
    /// and place the agent there.
    pub fn with_config(seed: u64, config: CrawlConfig) -> Self {
        let tiles = TileStore::new(seed, &config);
        let origin = config.origin;
        let initial_radius = config.initial_radius;
        let mut session = Self {
            tick: 0,
            config,
            tiles,
            graph: TileGraph::new(),
            traversal: TraversalController::new(),
            scheduler: TickScheduler::new(),
            agent: origin,
        };
        session.ensure_region(origin, initial_radius);
        session
    }

    /// Materialize a region and promote every new floor tile to a graph
    /// node. Returns the newly classified floor coordinates in
    /// materialization order.
    pub fn ensure_region(&mut self, center: TileCoord, radius: i32) -> Vec<TileCoord> {
        let new_floor = self.tiles.ensure_region(center, radius);
        for &coord in &new_floor {
            let id = self.graph.add_node(coord);
            self.graph.connect_if_adjacent(id);
        }
        new_floor
    }

    /// Classify a single coordinate, materializing it (and its graph node,
    /// if floor) on first contact.
    pub fn classify(&mut self, coord: TileCoord) -> Tile {
        self.ensure_region(coord, 0);
        self.tiles.get(coord)
    }

    /// Peek at a coordinate without materializing it.
    pub fn tile(&self, coord: TileCoord) -> Tile {
        self.tiles.get(coord)
    }

    /// The agent's current tile.
    pub fn agent(&self) -> TileCoord {
        self.agent
    }

    /// Shortest route between two explored floor coordinates, as adjacent
    /// tile coordinates from `from` to `to` inclusive. Empty when either
    /// endpoint is not a floor node or no route exists — both are normal
    /// outcomes, not errors.
    pub fn plan_path(&self, from: TileCoord, to: TileCoord) -> Vec<TileCoord> {
        let (Some(source), Some(dest)) = (self.graph.node_at(from), self.graph.node_at(to))
        else {
            return Vec::new();
        };
        match pathfinding::dijkstra(&self.graph, source, dest) {
            Some(result) => result
                .nodes
                .iter()
                .map(|&id| self.graph.node(id).coord)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Handle a click on `target`: classify it, plan a route from the
    /// agent, and start following it. Replaces any route in flight.
    pub fn request_move_to(&mut self, target: TileCoord) -> MoveRequest {
        let tile = self.tiles.get(target);
        if !tile.is_walkable() {
            return MoveRequest::NotWalkable { tile };
        }
        if target == self.agent {
            return MoveRequest::AlreadyThere;
        }

        let source = self
            .graph
            .node_at(self.agent)
            .expect("agent always stands on a floor node");
        let dest = self
            .graph
            .node_at(target)
            .expect("walkable target always has a floor node");

        let Some(result) = pathfinding::dijkstra(&self.graph, source, dest) else {
            return MoveRequest::NoPath;
        };

        // The agent already stands on the first node; follow the rest.
        let route: Vec<_> = result.nodes[1..].to_vec();
        let length = route.len();
        let generation = self.traversal.start_route(route);
        self.scheduler.schedule(
            self.tick + self.config.step_interval_ticks,
            StepKind::AgentStep { generation },
        );
        MoveRequest::RouteStarted { length }
    }

    /// Cancel the route in flight, leaving the agent on its current tile.
    /// Steps already scheduled become stale and are dropped when their tick
    /// comes due. Returns `true` if a route was actually cancelled.
    pub fn cancel_following(&mut self) -> bool {
        self.traversal.cancel()
    }

    /// Apply one traversal step right now: pop the next route node, move
    /// the agent onto it, and grow the map around the new position. The
    /// move and the region growth are one atomic unit from the caller's
    /// perspective.
    pub fn step_once(&mut self) -> StepOutcome {
        self.step_with_growth().0
    }

    /// Like `step_once`, also reporting how many new floor tiles the step's
    /// region growth produced.
    fn step_with_growth(&mut self) -> (StepOutcome, usize) {
        let outcome = self.traversal.tick();
        let mut new_floor = 0;
        if let StepOutcome::Stepped { node, .. } = outcome {
            // Routes are not re-planned when the graph changes underneath
            // them; a step onto a since-removed node drops the route.
            if !self.graph.contains(node) {
                self.traversal.cancel();
                return (StepOutcome::Idle, 0);
            }
            let coord = self.graph.node(node).coord;
            self.agent = coord;
            new_floor = self.ensure_region(coord, self.config.movement_radius).len();
        }
        (outcome, new_floor)
    }

    /// Advance the clock to `target_tick`, firing every scheduled step
    /// whose tick comes due along the way. Returns the events emitted.
    pub fn advance(&mut self, target_tick: u64) -> Vec<CrawlEvent> {
        let mut events = Vec::new();
        while self.tick < target_tick {
            self.tick = match self.scheduler.peek_tick() {
                Some(t) => t.min(target_tick),
                None => target_tick,
            };
            while let Some(step) = self.scheduler.pop_if_ready(self.tick) {
                match step.kind {
                    StepKind::AgentStep { generation } => {
                        self.apply_agent_step(generation, &mut events);
                    }
                }
            }
        }
        self.tick = target_tick;
        events
    }

    /// Direct movement command: one axis-aligned step onto a materialized
    /// floor tile. Cancels any route in flight. Returns `false` (and does
    /// nothing) when the target is a wall or unexplored.
    pub fn move_agent(&mut self, dx: i32, dy: i32) -> bool {
        debug_assert!(
            dx.abs() + dy.abs() == 1,
            "move_agent takes a unit axis step, got ({dx}, {dy})"
        );
        let target = self.agent.offset(dx, dy);
        if !self.tiles.get(target).is_walkable() {
            return false;
        }
        self.cancel_following();
        self.agent = target;
        self.ensure_region(target, self.config.movement_radius);
        true
    }

    /// Process one scheduled `AgentStep`.
    fn apply_agent_step(&mut self, generation: u64, events: &mut Vec<CrawlEvent>) {
        if generation != self.traversal.generation() {
            return; // stale: the route was replaced or cancelled
        }
        let (outcome, new_floor) = self.step_with_growth();
        match outcome {
            StepOutcome::Idle => {}
            StepOutcome::Completed => events.push(CrawlEvent {
                tick: self.tick,
                kind: CrawlEventKind::RouteCompleted,
            }),
            StepOutcome::Stepped { node: _, completed } => {
                let to = self.agent;
                events.push(CrawlEvent {
                    tick: self.tick,
                    kind: CrawlEventKind::AgentStepped { to },
                });
                events.push(CrawlEvent {
                    tick: self.tick,
                    kind: CrawlEventKind::RegionMaterialized {
                        center: to,
                        new_floor,
                    },
                });
                if completed {
                    events.push(CrawlEvent {
                        tick: self.tick,
                        kind: CrawlEventKind::RouteCompleted,
                    });
                } else {
                    self.scheduler.schedule(
                        self.tick + self.config.step_interval_ticks,
                        StepKind::AgentStep { generation },
                    );
                }
            }
        }
    }
}
