//! Components
//!
//! States and the per-individual attribute table.

pub mod attributes;
pub mod registry;
pub mod state;

pub use attributes::*;
pub use registry::*;
pub use state::*;
