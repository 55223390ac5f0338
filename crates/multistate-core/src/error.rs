//! Error Types
//!
//! Construction-time problems are [`ConfigurationError`]s and abort
//! construction entirely. Problems found while the simulation runs are
//! [`SimulationError`]s and are fatal to the run.

use multistate_events::{IndividualId, SimTime, StateId};
use thiserror::Error;

/// The model or cohort handed to the simulation is inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The transition matrix has no rows.
    #[error("transition matrix is empty")]
    EmptyMatrix,

    /// A row of the transition matrix has the wrong length.
    #[error("transition matrix row {row} has {found} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Nonzero matrix cells and transition specifications do not pair up.
    #[error("transition matrix has {cells} nonzero cells but {specs} transitions were supplied")]
    TransitionCountMismatch { cells: usize, specs: usize },

    #[error("unknown transition kind '{0}'")]
    UnknownTransitionKind(String),

    #[error("transition '{kind}' is missing parameter '{parameter}'")]
    MissingParameter { kind: String, parameter: String },

    #[error("transition '{kind}' does not take parameter '{parameter}'")]
    UnexpectedParameter { kind: String, parameter: String },

    /// A coefficient vector does not match the attribute row width.
    #[error(
        "transition {source_state}->{destination} parameter '{parameter}' has {found} coefficients, expected {expected}"
    )]
    CoefficientWidth {
        source_state: StateId,
        destination: StateId,
        parameter: String,
        expected: usize,
        found: usize,
    },

    /// An attribute row has a different width than the first row.
    #[error("attribute row {row} has {found} values, expected {expected}")]
    AttributeWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Fewer attribute rows than individuals.
    #[error("{individuals} individuals but only {rows} attribute rows")]
    MissingAttributes { individuals: usize, rows: usize },

    /// Entry times must be finite and non-negative.
    #[error("individual {individual} has invalid entry time {time}")]
    InvalidEntryTime { individual: IndividualId, time: f64 },
}

/// A run-time invariant was violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Pop or peek on an empty event queue.
    #[error("event queue is empty")]
    EmptyQueue,

    #[error("state {index} out of range (registry has {len} states)")]
    StateOutOfRange { index: StateId, len: usize },

    #[error("individual {index} out of range (cohort has {len} individuals)")]
    IndividualOutOfRange { index: IndividualId, len: usize },

    /// A transition model produced an arrival before the current clock.
    #[error("{individual} scheduled into {state} at {requested} before the clock at {current}")]
    NonCausalEvent {
        individual: IndividualId,
        state: StateId,
        requested: SimTime,
        current: SimTime,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_count_mismatch() {
        let e = ConfigurationError::TransitionCountMismatch { cells: 3, specs: 2 };
        assert_eq!(
            e.to_string(),
            "transition matrix has 3 nonzero cells but 2 transitions were supplied"
        );
    }

    #[test]
    fn test_display_non_causal() {
        let e = SimulationError::NonCausalEvent {
            individual: IndividualId(1),
            state: StateId(2),
            requested: SimTime::new(3.0),
            current: SimTime::new(10.0),
        };
        let s = e.to_string();
        assert!(s.contains("t=3"));
        assert!(s.contains("t=10"));
    }

    #[test]
    fn test_configuration_converts() {
        let e: SimulationError = ConfigurationError::EmptyMatrix.into();
        assert_eq!(e.to_string(), "transition matrix is empty");
        assert!(matches!(e, SimulationError::Configuration(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(SimulationError::EmptyQueue);
        assert!(!e.to_string().is_empty());
    }
}
