// Route-following state machine.
//
// The controller owns at most one route at a time — a front-consumed queue
// of node ids in source → destination order, excluding the tile the agent
// already stands on. Each `tick()` hands back the next node to step onto;
// the session applies the actual agent move and region growth so the whole
// step is one synchronous unit.
//
// Starting a new route implicitly cancels the one in flight, and `cancel()`
// does so explicitly, leaving the agent wherever it currently is. Both bump
// the route `generation`, which the scheduler uses to drop steps that were
// queued for a route that no longer exists (see `scheduler.rs`).
//
// The Cancelled and Completed states of the design collapse immediately to
// Idle; `StepOutcome` reports the transition to the caller instead.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Whether the controller is consuming a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowState {
    #[default]
    Idle,
    Following,
}

/// What a single `tick()` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not following anything; nothing happened.
    Idle,
    /// Stepped onto `node`. `completed` is set when that was the route's
    /// last tile and the controller is Idle again.
    Stepped { node: NodeId, completed: bool },
    /// Was Following with an already-empty route; transitioned to Idle
    /// without moving.
    Completed,
}

/// Consumes a planned route one node per tick.
#[derive(Clone, Debug, Default)]
pub struct TraversalController {
    state: FollowState,
    route: VecDeque<NodeId>,
    generation: u64,
}

impl TraversalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any in-flight route and start following the new one.
    /// Returns the new route generation for the caller to schedule against.
    pub fn start_route(&mut self, nodes: Vec<NodeId>) -> u64 {
        self.route = nodes.into();
        self.state = FollowState::Following;
        self.generation += 1;
        self.generation
    }

    /// Discard the remaining route without moving. Synchronous — there is
    /// never a half-applied step to unwind. Returns `true` if a route was
    /// actually in flight.
    pub fn cancel(&mut self) -> bool {
        let was_following = self.state == FollowState::Following;
        self.route.clear();
        self.state = FollowState::Idle;
        self.generation += 1;
        was_following
    }

    /// Consume one step of the route.
    pub fn tick(&mut self) -> StepOutcome {
        if self.state == FollowState::Idle {
            return StepOutcome::Idle;
        }
        match self.route.pop_front() {
            Some(node) => {
                let completed = self.route.is_empty();
                if completed {
                    self.state = FollowState::Idle;
                }
                StepOutcome::Stepped { node, completed }
            }
            None => {
                self.state = FollowState::Idle;
                StepOutcome::Completed
            }
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    /// Steps left in the current route.
    pub fn remaining(&self) -> usize {
        self.route.len()
    }

    /// Current route generation. Bumped on every start and cancel.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
