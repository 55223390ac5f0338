//! Attribute Table
//!
//! One fixed-width numeric row per individual, read-only for the lifetime
//! of a simulation. Column meaning belongs to the transition models.

use multistate_events::IndividualId;

use crate::error::{ConfigurationError, SimulationError};

/// Row-major attribute storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    width: usize,
    rows: usize,
    values: Vec<f64>,
}

impl AttributeTable {
    /// Builds a table from rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ConfigurationError> {
        let width = rows.first().map_or(0, Vec::len);
        let count = rows.len();
        let mut values = Vec::with_capacity(width * rows.len());
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(ConfigurationError::AttributeWidth {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            values.extend(cells);
        }
        Ok(Self {
            width,
            rows: count,
            values,
        })
    }

    /// A table of `rows` intercept-only rows (`[1.0]`).
    pub fn intercept_only(rows: usize) -> Self {
        Self {
            width: 1,
            rows,
            values: vec![1.0; rows],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, individual: IndividualId) -> Result<&[f64], SimulationError> {
        if individual.index() >= self.rows {
            return Err(SimulationError::IndividualOutOfRange {
                index: individual,
                len: self.rows,
            });
        }
        let start = individual.index() * self.width;
        Ok(&self.values[start..start + self.width])
    }
}
