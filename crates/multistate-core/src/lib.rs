//! Discrete-event multi-state simulation kernel.
//!
//! A cohort of independent individuals enters state 0 at individually
//! assigned times and moves between states according to attribute-dependent
//! transition models until every individual is absorbed.
//!
//! # Modules
//!
//! - [`components`]: states, the state registry and the attribute table
//! - [`transition`]: parametric transition models and the transition factory
//! - [`setup`]: builds the registry from a transition matrix
//! - [`systems`]: the event scheduler and the simulation driver
//! - [`config`]: TOML scenario files
//! - [`output`]: history writers and occupancy summaries

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod systems;
pub mod transition;

pub use components::{AttributeTable, Registry, State};
pub use config::{CohortConfig, ModelConfig, ScenarioConfig, ScenarioError};
pub use error::{ConfigurationError, SimulationError};
pub use setup::{RegistryBuilder, TransitionMatrix};
pub use systems::{EventQueue, RunSummary, Simulation, SimulationOptions, DEFAULT_SEED};
pub use transition::{Arrival, TimeScale, Transition, TransitionKind, TransitionSpec};

pub use multistate_events::{Event, History, HistoryEntry, IndividualId, SimTime, StateId};
