//! Transitions
//!
//! An outgoing edge of a state. Each edge carries a parametric model whose
//! parameters are linear predictors over the individual's attributes; the
//! model kind is chosen by name when the registry is built.

pub mod coefficients;
pub mod hazard;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use multistate_events::{Event, SimTime, StateId};

use crate::error::ConfigurationError;

pub use coefficients::{Coefficients, Link, Parameter};
pub use hazard::Hazard;

/// The external description of one transition: a kind name and the
/// coefficient vector for each of its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub name: String,
    #[serde(default)]
    pub coefs: BTreeMap<String, Vec<f64>>,
}

impl TransitionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coefs: BTreeMap::new(),
        }
    }

    /// Builder-style parameter insertion.
    pub fn with(mut self, parameter: impl Into<String>, coefficients: Vec<f64>) -> Self {
        self.coefs.insert(parameter.into(), coefficients);
        self
    }
}

/// Which clock a transition model reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeScale {
    /// Time since entering the current state (semi-Markov).
    #[default]
    ClockReset,
    /// Time since entering the system.
    ClockForward,
}

impl TimeScale {
    /// The point the model's clock started from for this event.
    pub fn origin(self, event: &Event) -> SimTime {
        match self {
            TimeScale::ClockReset => event.time,
            TimeScale::ClockForward => event.entered_at,
        }
    }
}

/// A realized draw from a transition: where and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub destination: StateId,
    pub time: SimTime,
}

/// Model kinds and their parameter records.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionKind {
    Fixed { delay: Parameter },
    Exponential { rate: Parameter },
    Weibull { shape: Parameter, scale: Parameter },
    Gompertz { shape: Parameter, rate: Parameter },
    LogLogistic { shape: Parameter, scale: Parameter },
}

impl TransitionKind {
    /// Builds the kind named by `spec`, consuming exactly its parameters.
    pub fn from_spec(spec: &TransitionSpec) -> Result<Self, ConfigurationError> {
        let mut params = ParameterSet::new(spec);
        let kind = match spec.name.as_str() {
            "fixed" => TransitionKind::Fixed {
                delay: params.take("delay", Link::Identity)?,
            },
            "exp" => TransitionKind::Exponential {
                rate: params.take("rate", Link::Log)?,
            },
            "weibull" => TransitionKind::Weibull {
                shape: params.take("shape", Link::Log)?,
                scale: params.take("scale", Link::Log)?,
            },
            "gompertz" => TransitionKind::Gompertz {
                shape: params.take("shape", Link::Identity)?,
                rate: params.take("rate", Link::Log)?,
            },
            "llogis" => TransitionKind::LogLogistic {
                shape: params.take("shape", Link::Log)?,
                scale: params.take("scale", Link::Log)?,
            },
            other => return Err(ConfigurationError::UnknownTransitionKind(other.to_string())),
        };
        params.finish()?;
        Ok(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransitionKind::Fixed { .. } => "fixed",
            TransitionKind::Exponential { .. } => "exp",
            TransitionKind::Weibull { .. } => "weibull",
            TransitionKind::Gompertz { .. } => "gompertz",
            TransitionKind::LogLogistic { .. } => "llogis",
        }
    }

    pub fn parameters(&self) -> Vec<&Parameter> {
        match self {
            TransitionKind::Fixed { delay } => vec![delay],
            TransitionKind::Exponential { rate } => vec![rate],
            TransitionKind::Weibull { shape, scale } => vec![shape, scale],
            TransitionKind::Gompertz { shape, rate } => vec![shape, rate],
            TransitionKind::LogLogistic { shape, scale } => vec![shape, scale],
        }
    }

    /// Resolves the parameters for one individual.
    pub fn hazard(&self, attributes: &[f64]) -> Hazard {
        match self {
            TransitionKind::Fixed { delay } => Hazard::Fixed {
                delay: delay.value(attributes),
            },
            TransitionKind::Exponential { rate } => Hazard::Exponential {
                rate: rate.value(attributes),
            },
            TransitionKind::Weibull { shape, scale } => Hazard::Weibull {
                shape: shape.value(attributes),
                scale: scale.value(attributes),
            },
            TransitionKind::Gompertz { shape, rate } => Hazard::Gompertz {
                shape: shape.value(attributes),
                rate: rate.value(attributes),
            },
            TransitionKind::LogLogistic { shape, scale } => Hazard::LogLogistic {
                shape: shape.value(attributes),
                scale: scale.value(attributes),
            },
        }
    }
}

/// An outgoing edge of a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    destination: StateId,
    kind: TransitionKind,
}

impl Transition {
    /// The transition factory: builds the model named by `spec` leading to
    /// `destination`.
    pub fn create(spec: &TransitionSpec, destination: StateId) -> Result<Self, ConfigurationError> {
        Ok(Self {
            destination,
            kind: TransitionKind::from_spec(spec)?,
        })
    }

    pub fn destination(&self) -> StateId {
        self.destination
    }

    pub fn kind(&self) -> &TransitionKind {
        &self.kind
    }

    /// Samples the arrival time in `destination`.
    ///
    /// `origin` is where the model's clock starts (see [`TimeScale`]);
    /// the individual is known to have survived from `origin` to `now`.
    /// Returns `None` when the transition never fires.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        attributes: &[f64],
        now: SimTime,
        origin: SimTime,
        rng: &mut R,
    ) -> Option<Arrival> {
        let elapsed = now.since(origin);
        let t = self.kind.hazard(attributes).sample_after(elapsed, rng);
        let time = origin.after(t);
        time.is_finite().then_some(Arrival {
            destination: self.destination,
            time,
        })
    }
}

/// Tracks which parameters of a spec have been consumed.
struct ParameterSet<'a> {
    kind: &'a str,
    remaining: BTreeMap<&'a str, &'a Vec<f64>>,
}

impl<'a> ParameterSet<'a> {
    fn new(spec: &'a TransitionSpec) -> Self {
        Self {
            kind: &spec.name,
            remaining: spec
                .coefs
                .iter()
                .map(|(name, values)| (name.as_str(), values))
                .collect(),
        }
    }

    fn take(&mut self, name: &'static str, link: Link) -> Result<Parameter, ConfigurationError> {
        let values = self
            .remaining
            .remove(name)
            .ok_or_else(|| ConfigurationError::MissingParameter {
                kind: self.kind.to_string(),
                parameter: name.to_string(),
            })?;
        Ok(Parameter::new(name, Coefficients::new(values.clone()), link))
    }

    fn finish(self) -> Result<(), ConfigurationError> {
        match self.remaining.into_keys().next() {
            Some(extra) => Err(ConfigurationError::UnexpectedParameter {
                kind: self.kind.to_string(),
                parameter: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multistate_events::IndividualId;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_known_kinds() {
        let spec = TransitionSpec::new("weibull")
            .with("shape", vec![0.1])
            .with("scale", vec![1.0]);
        let transition = Transition::create(&spec, StateId(2)).unwrap();
        assert_eq!(transition.destination(), StateId(2));
        assert_eq!(transition.kind().name(), "weibull");
        assert_eq!(transition.kind().parameters().len(), 2);
    }

    #[test]
    fn test_unknown_kind() {
        let spec = TransitionSpec::new("bogus");
        let err = Transition::create(&spec, StateId(1)).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownTransitionKind("bogus".into()));
    }

    #[test]
    fn test_missing_parameter() {
        let spec = TransitionSpec::new("gompertz").with("shape", vec![0.0]);
        let err = Transition::create(&spec, StateId(1)).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingParameter {
                kind: "gompertz".into(),
                parameter: "rate".into(),
            }
        );
    }

    #[test]
    fn test_unexpected_parameter() {
        let spec = TransitionSpec::new("exp")
            .with("rate", vec![0.0])
            .with("scale", vec![1.0]);
        let err = Transition::create(&spec, StateId(1)).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnexpectedParameter { .. }));
    }

    #[test]
    fn test_fixed_evaluate() {
        let spec = TransitionSpec::new("fixed").with("delay", vec![5.0]);
        let transition = Transition::create(&spec, StateId(1)).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        let arrival = transition
            .evaluate(&[1.0], SimTime::new(2.0), SimTime::new(2.0), &mut rng)
            .unwrap();
        assert_eq!(arrival.destination, StateId(1));
        assert_eq!(arrival.time, SimTime::new(7.0));
    }

    #[test]
    fn test_clock_forward_measures_from_entry() {
        let spec = TransitionSpec::new("fixed").with("delay", vec![5.0]);
        let transition = Transition::create(&spec, StateId(1)).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        let mut event = Event::entry(IndividualId(0), SimTime::new(1.0));
        event = event.next(StateId(3), SimTime::new(4.0));
        let origin = TimeScale::ClockForward.origin(&event);
        assert_eq!(origin, SimTime::new(1.0));

        let arrival = transition.evaluate(&[1.0], event.time, origin, &mut rng).unwrap();
        assert_eq!(arrival.time, SimTime::new(6.0));
        assert_eq!(TimeScale::ClockReset.origin(&event), SimTime::new(4.0));
    }

    #[test]
    fn test_negative_delay_arrives_before_now() {
        let spec = TransitionSpec::new("fixed").with("delay", vec![-2.0]);
        let transition = Transition::create(&spec, StateId(1)).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        let arrival = transition
            .evaluate(&[1.0], SimTime::new(4.0), SimTime::new(4.0), &mut rng)
            .unwrap();
        assert_eq!(arrival.time, SimTime::new(2.0));
    }

    #[test]
    fn test_never_firing_transition() {
        // Gompertz with a strongly negative shape almost never fires.
        let spec = TransitionSpec::new("gompertz")
            .with("shape", vec![-50.0])
            .with("rate", vec![-10.0]);
        let transition = Transition::create(&spec, StateId(1)).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let fired = (0..100)
            .filter_map(|_| transition.evaluate(&[1.0], SimTime::ZERO, SimTime::ZERO, &mut rng))
            .count();
        assert_eq!(fired, 0);
    }

    #[test]
    fn test_time_scale_deserializes() {
        #[derive(Deserialize)]
        struct Wrapper {
            scale: TimeScale,
        }
        let w: Wrapper = toml::from_str("scale = \"clock_forward\"").unwrap();
        assert_eq!(w.scale, TimeScale::ClockForward);
        assert_eq!(TimeScale::default(), TimeScale::ClockReset);
    }
}
