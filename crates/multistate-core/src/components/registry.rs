//! State Registry
//!
//! The fixed set of states, indexed by `StateId`.

use std::collections::BTreeSet;

use multistate_events::StateId;

use crate::components::state::State;
use crate::error::SimulationError;

/// All states of the process. Built once by
/// [`RegistryBuilder`](crate::setup::RegistryBuilder), immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    states: Vec<State>,
}

impl Registry {
    pub(crate) fn from_states(states: Vec<State>) -> Self {
        debug_assert!(states.iter().enumerate().all(|(i, s)| s.id().index() == i));
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, id: StateId) -> Result<&State, SimulationError> {
        self.states
            .get(id.index())
            .ok_or(SimulationError::StateOutOfRange {
                index: id,
                len: self.states.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    /// Total number of outgoing edges across all states.
    pub fn edge_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions().len()).sum()
    }

    pub fn absorbing_states(&self) -> Vec<StateId> {
        self.states
            .iter()
            .filter(|s| s.is_absorbing())
            .map(State::id)
            .collect()
    }

    /// Every state reachable from `start` (including `start` itself).
    pub fn reachable_from(&self, start: StateId) -> BTreeSet<StateId> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Ok(state) = self.get(id) else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            stack.extend(state.transitions().iter().map(|t| t.destination()));
        }
        seen
    }

    /// True if an absorbing state can be reached from every state.
    pub fn always_absorbs(&self) -> bool {
        let absorbing: BTreeSet<StateId> = self.absorbing_states().into_iter().collect();
        self.states
            .iter()
            .all(|s| !self.reachable_from(s.id()).is_disjoint(&absorbing))
    }
}
