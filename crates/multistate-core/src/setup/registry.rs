//! Registry Setup
//!
//! Builds the adjacency-list state registry from a transition matrix and a
//! flat list of transition specifications.
//!
//! The matrix is scanned row-major. Every nonzero cell `(source, dest)`
//! consumes the next unconsumed specification and becomes an outgoing edge
//! of `source` leading to `dest`.

use multistate_events::StateId;

use crate::components::registry::Registry;
use crate::components::state::State;
use crate::error::ConfigurationError;
use crate::transition::{Transition, TransitionSpec};

/// Square adjacency matrix; nonzero means "a transition exists".
pub type TransitionMatrix = Vec<Vec<i64>>;

/// Pairs a transition matrix with its specifications.
#[derive(Debug, Clone, Copy)]
pub struct RegistryBuilder<'a> {
    matrix: &'a [Vec<i64>],
    specs: &'a [TransitionSpec],
}

impl<'a> RegistryBuilder<'a> {
    pub fn new(matrix: &'a [Vec<i64>], specs: &'a [TransitionSpec]) -> Self {
        Self { matrix, specs }
    }

    /// Number of nonzero cells, i.e. the number of specs required.
    pub fn transition_cells(&self) -> usize {
        self.matrix
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell != 0)
            .count()
    }

    /// Validates the shape and the cell/spec pairing, then builds every
    /// state. Nothing is returned unless the whole registry is valid.
    pub fn build(self) -> Result<Registry, ConfigurationError> {
        let n = self.matrix.len();
        if n == 0 {
            return Err(ConfigurationError::EmptyMatrix);
        }
        for (row, cells) in self.matrix.iter().enumerate() {
            if cells.len() != n {
                return Err(ConfigurationError::NonSquareMatrix {
                    row,
                    expected: n,
                    found: cells.len(),
                });
            }
        }

        let cells = self.transition_cells();
        let mismatch = ConfigurationError::TransitionCountMismatch {
            cells,
            specs: self.specs.len(),
        };
        if cells != self.specs.len() {
            return Err(mismatch);
        }

        let mut specs = self.specs.iter();
        let mut states = Vec::with_capacity(n);
        for (source, row) in self.matrix.iter().enumerate() {
            let mut state = State::new(StateId(source));
            for (dest, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let spec = specs.next().ok_or_else(|| mismatch.clone())?;
                state.add_transition(Transition::create(spec, StateId(dest))?);
            }
            states.push(state);
        }

        let registry = Registry::from_states(states);
        tracing::debug!(
            states = registry.len(),
            transitions = registry.edge_count(),
            absorbing = registry.absorbing_states().len(),
            "Built state registry"
        );
        Ok(registry)
    }
}
