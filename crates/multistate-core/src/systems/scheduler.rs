//! Event Scheduler
//!
//! A min-heap of pending events keyed by `(time, sequence)`. Sequence
//! numbers increase strictly with insertion order, so events scheduled for
//! the same instant pop in the order they were pushed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use multistate_events::{Event, SimTime};

use crate::error::SimulationError;

/// A queued event and its tie-break key.
#[derive(Debug, Clone, Copy)]
struct Scheduled {
    sequence: u64,
    event: Event,
}

impl Scheduled {
    fn key(&self) -> (SimTime, u64) {
        (self.event.time, self.sequence)
    }
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    /// Reversed so that `BinaryHeap` (a max-heap) yields the earliest event.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Time-ordered queue of pending events.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Scheduled>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Scheduled { sequence, event });
    }

    /// Removes the earliest event (lowest sequence among equal times).
    pub fn pop_earliest(&mut self) -> Result<Event, SimulationError> {
        self.heap
            .pop()
            .map(|scheduled| scheduled.event)
            .ok_or(SimulationError::EmptyQueue)
    }

    pub fn peek_earliest_time(&self) -> Result<SimTime, SimulationError> {
        self.heap
            .peek()
            .map(|scheduled| scheduled.event.time)
            .ok_or(SimulationError::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Empties the queue in pop order.
    pub fn drain_ordered(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.heap.len());
        while let Some(scheduled) = self.heap.pop() {
            events.push(scheduled.event);
        }
        events
    }
}
