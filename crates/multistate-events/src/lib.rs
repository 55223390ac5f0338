//! Shared value types for the multi-state simulation.
//!
//! This crate contains pure data structures with no simulation logic:
//! identifiers, simulation time, scheduled events and the realized
//! history log. It is a dependency for all other crates in the workspace.

pub mod event;
pub mod history;
pub mod timestamp;

// Re-export timestamp types
pub use timestamp::SimTime;

// Re-export event types
pub use event::{Event, IndividualId, StateId};

// Re-export history types
pub use history::{History, HistoryEntry};
