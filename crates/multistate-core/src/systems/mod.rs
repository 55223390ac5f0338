//! Simulation Systems
//!
//! The event scheduler and the event-processing driver.

pub mod scheduler;
pub mod simulation;

pub use scheduler::EventQueue;
pub use simulation::{RunSummary, Simulation, SimulationOptions, DEFAULT_SEED};
