//! Coefficients
//!
//! Linear predictors over an individual's attribute row.

use serde::{Deserialize, Serialize};

/// How a linear predictor maps onto a model parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Identity,
    /// Keeps the parameter strictly positive.
    Log,
}

impl Link {
    pub fn apply(self, linear_predictor: f64) -> f64 {
        match self {
            Link::Identity => linear_predictor,
            Link::Log => linear_predictor.exp(),
        }
    }
}

/// One coefficient per attribute column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficients(Vec<f64>);

impl Coefficients {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of attribute columns this predictor expects.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// `Σ coef[i] * attrs[i]`. Widths are checked when the simulation is
    /// built, so a mismatch here only truncates to the shorter side.
    pub fn linear_predictor(&self, attributes: &[f64]) -> f64 {
        self.0
            .iter()
            .zip(attributes)
            .map(|(coef, value)| coef * value)
            .sum()
    }
}

/// A named model parameter and the predictor that produces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: &'static str,
    pub coefficients: Coefficients,
    pub link: Link,
}

impl Parameter {
    pub fn new(name: &'static str, coefficients: Coefficients, link: Link) -> Self {
        Self {
            name,
            coefficients,
            link,
        }
    }

    /// The parameter value for one individual.
    pub fn value(&self, attributes: &[f64]) -> f64 {
        self.link
            .apply(self.coefficients.linear_predictor(attributes))
    }
}
