//! Output
//!
//! History writers and summary statistics.

pub mod stats;
pub mod writer;

pub use stats::{OccupancySummary, StateOccupancy};
pub use writer::{HistoryFormat, HistoryWriter, OutputError};
