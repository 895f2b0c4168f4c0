// Tick-ordered step queue — the explicit scheduler behind traversal.
//
// Traversal is the one periodic, cancellable operation in the core, and it
// is driven by this queue rather than a framework timer: the session
// schedules an `AgentStep` a fixed number of ticks ahead, `advance()` pops
// steps as their tick comes due, and cancellation works by generation —
// a queued step whose generation no longer matches the controller's is
// simply dropped at processing time, so there is nothing to unschedule.
//
// A min-heap over `(tick, sequence)` gives a total processing order; the
// monotonic sequence counter breaks ties within a tick deterministically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A step scheduled for a future tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledStep {
    /// The tick at which this step should fire.
    pub tick: u64,
    /// Unique ordering key for deterministic tiebreaking within a tick.
    pub sequence: u64,
    pub kind: StepKind,
}

/// The kinds of step the session can schedule.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum StepKind {
    /// One traversal step for the route with the given generation. Stale
    /// generations (route replaced or cancelled since scheduling) are
    /// ignored when popped.
    AgentStep { generation: u64 },
}

// Min-heap: lowest (tick, sequence) fires first. Rust's BinaryHeap is a
// max-heap, so the ordering is reversed.
impl PartialEq for ScheduledStep {
    fn eq(&self, other: &Self) -> bool {
        self.tick == other.tick && self.sequence == other.sequence
    }
}

impl Eq for ScheduledStep {}

impl PartialOrd for ScheduledStep {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledStep {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .tick
            .cmp(&self.tick)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of scheduled steps, earliest tick first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TickScheduler {
    heap: BinaryHeap<ScheduledStep>,
    next_sequence: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a step at the given tick.
    pub fn schedule(&mut self, tick: u64, kind: StepKind) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScheduledStep {
            tick,
            sequence,
            kind,
        });
    }

    /// Tick of the next pending step, if any.
    pub fn peek_tick(&self) -> Option<u64> {
        self.heap.peek().map(|s| s.tick)
    }

    /// Pop the next step if its tick is <= `up_to_tick`.
    pub fn pop_if_ready(&mut self, up_to_tick: u64) -> Option<ScheduledStep> {
        if self.heap.peek().is_some_and(|s| s.tick <= up_to_tick) {
            self.heap.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_tick_then_sequence_order() {
        let mut queue = TickScheduler::new();
        queue.schedule(100, StepKind::AgentStep { generation: 1 });
        queue.schedule(50, StepKind::AgentStep { generation: 1 });
        queue.schedule(50, StepKind::AgentStep { generation: 2 });

        let first = queue.pop_if_ready(200).unwrap();
        assert_eq!((first.tick, first.sequence), (50, 1));
        let second = queue.pop_if_ready(200).unwrap();
        assert_eq!((second.tick, second.sequence), (50, 2));
        let third = queue.pop_if_ready(200).unwrap();
        assert_eq!(third.tick, 100);
        assert!(queue.pop_if_ready(200).is_none());
    }

    #[test]
    fn pop_if_ready_respects_tick_limit() {
        let mut queue = TickScheduler::new();
        queue.schedule(100, StepKind::AgentStep { generation: 0 });
        assert!(queue.pop_if_ready(99).is_none());
        assert!(queue.pop_if_ready(100).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut queue = TickScheduler::new();
        queue.schedule(7, StepKind::AgentStep { generation: 0 });
        assert_eq!(queue.peek_tick(), Some(7));
        assert_eq!(queue.len(), 1);
    }
}
