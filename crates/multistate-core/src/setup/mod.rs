//! Model Setup
//!
//! Turns external model descriptions into the state registry.

pub mod registry;

pub use registry::*;
