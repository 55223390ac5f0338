//! Event Types
//!
//! Identifiers and the scheduled event record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::timestamp::SimTime;

/// Index of an individual in the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndividualId(pub usize);

impl IndividualId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

/// Index of a state in the registry.
///
/// State 0 is the universal entry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub usize);

impl StateId {
    /// The state every individual enters the system in.
    pub const ENTRY: StateId = StateId(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// A scheduled transition evaluation.
///
/// "Individual `individual` arrives in `state` at `time` and evaluates its
/// next transition there." Events refer to individuals and states by index
/// only and are consumed exactly once when popped from the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub individual: IndividualId,
    pub state: StateId,
    pub time: SimTime,
    /// When the individual entered the system.
    pub entered_at: SimTime,
}

impl Event {
    /// Creates the initial event placing an individual in the entry state.
    pub fn entry(individual: IndividualId, time: SimTime) -> Self {
        Self {
            individual,
            state: StateId::ENTRY,
            time,
            entered_at: time,
        }
    }

    /// Creates the follow-up event for the same individual.
    pub fn next(&self, state: StateId, time: SimTime) -> Self {
        Self {
            individual: self.individual,
            state,
            time,
            entered_at: self.entered_at,
        }
    }

    /// Time spent in the system so far.
    pub fn time_in_system(&self) -> f64 {
        self.time.since(self.entered_at)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} at {}", self.individual, self.state, self.time)
    }
}
