//! History
//!
//! Append-only log of realized transitions.

use serde::{Deserialize, Serialize};

use crate::event::{IndividualId, StateId};
use crate::timestamp::SimTime;

/// One realized transition: `individual` arrives in `state` at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub individual: IndividualId,
    pub state: StateId,
    pub time: SimTime,
}

impl HistoryEntry {
    pub fn new(individual: IndividualId, state: StateId, time: SimTime) -> Self {
        Self {
            individual,
            state,
            time,
        }
    }
}

impl From<HistoryEntry> for (usize, usize, f64) {
    fn from(entry: HistoryEntry) -> Self {
        (entry.individual.0, entry.state.0, entry.time.value())
    }
}

/// The realized trajectories of every individual, in append order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Copies the log out, leaving it untouched.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// The trajectory of a single individual, in append order.
    pub fn for_individual(&self, individual: IndividualId) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.individual == individual)
            .copied()
            .collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<History> for Vec<HistoryEntry> {
    fn from(history: History) -> Self {
        history.entries
    }
}
