//! Simulation Time
//!
//! Continuous simulation time with a total order.
//!
//! # Example
//!
//! ```
//! use multistate_events::SimTime;
//!
//! let entry = SimTime::new(2.0);
//! let arrival = entry.after(3.5);
//! assert_eq!(arrival, SimTime::new(5.5));
//! assert_eq!(arrival.since(entry), 3.5);
//! assert!(entry < arrival);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A point in continuous simulation time.
///
/// Ordering uses `f64::total_cmp`, so every value (including infinities)
/// has a well-defined place and `SimTime` can key a heap. Callers are
/// expected to keep times finite; see [`SimTime::is_finite`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(f64);

impl SimTime {
    /// The origin of simulation time.
    pub const ZERO: SimTime = SimTime(0.0);

    /// A time that is never reached.
    pub const NEVER: SimTime = SimTime(f64::INFINITY);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if this time is neither infinite nor NaN.
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Returns the time `duration` units after this one.
    pub fn after(self, duration: f64) -> Self {
        Self(self.0 + duration)
    }

    /// Returns the elapsed duration since `earlier`.
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for SimTime {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
