//! Simulation Driver
//!
//! Owns the registry, the attribute table, the event queue, the clock and
//! the history, and drives individuals through states until no events
//! remain. Everything lives on the `Simulation` value, so independent
//! simulations can run side by side.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use multistate_events::{Event, History, HistoryEntry, IndividualId, SimTime, StateId};

use crate::components::{AttributeTable, Registry, State};
use crate::config::ScenarioConfig;
use crate::error::{ConfigurationError, SimulationError};
use crate::setup::RegistryBuilder;
use crate::systems::scheduler::EventQueue;
use crate::transition::{TimeScale, TransitionSpec};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Run-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Seed for the simulation's random number generator
    pub seed: u64,
    /// Clock the transition models read
    pub time_scale: TimeScale,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            time_scale: TimeScale::default(),
        }
    }
}

/// What a call to [`Simulation::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub events_processed: u64,
    pub final_clock: SimTime,
}

/// A single multi-state simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    registry: Registry,
    attributes: AttributeTable,
    queue: EventQueue,
    history: History,
    clock: SimTime,
    time_scale: TimeScale,
    rng: SmallRng,
    individuals: usize,
}

impl Simulation {
    /// Validates the cohort against the registry and seeds one entry event
    /// per individual in state 0 at its entry time.
    pub fn new(
        registry: Registry,
        attributes: AttributeTable,
        entry_times: &[f64],
        options: SimulationOptions,
    ) -> Result<Self, ConfigurationError> {
        if attributes.len() < entry_times.len() {
            return Err(ConfigurationError::MissingAttributes {
                individuals: entry_times.len(),
                rows: attributes.len(),
            });
        }
        check_coefficient_widths(&registry, attributes.width())?;

        let mut queue = EventQueue::with_capacity(entry_times.len());
        for (index, &time) in entry_times.iter().enumerate() {
            let individual = IndividualId(index);
            if !time.is_finite() || time < 0.0 {
                return Err(ConfigurationError::InvalidEntryTime { individual, time });
            }
            queue.push(Event::entry(individual, SimTime::new(time)));
        }

        tracing::info!(
            individuals = entry_times.len(),
            states = registry.len(),
            seed = options.seed,
            time_scale = ?options.time_scale,
            "Seeded simulation"
        );

        Ok(Self {
            registry,
            attributes,
            queue,
            history: History::new(),
            clock: SimTime::ZERO,
            time_scale: options.time_scale,
            rng: SmallRng::seed_from_u64(options.seed),
            individuals: entry_times.len(),
        })
    }

    /// Builds the registry from a matrix and its specs, then the simulation.
    pub fn from_matrix(
        matrix: &[Vec<i64>],
        specs: &[TransitionSpec],
        attributes: AttributeTable,
        entry_times: &[f64],
        options: SimulationOptions,
    ) -> Result<Self, ConfigurationError> {
        let registry = RegistryBuilder::new(matrix, specs).build()?;
        Self::new(registry, attributes, entry_times, options)
    }

    pub fn from_scenario(scenario: &ScenarioConfig) -> Result<Self, ConfigurationError> {
        let attributes = match &scenario.cohort.attributes {
            Some(rows) => AttributeTable::from_rows(rows.clone())?,
            None => AttributeTable::intercept_only(scenario.cohort.entry_times.len()),
        };
        Self::from_matrix(
            &scenario.model.matrix,
            &scenario.model.transitions,
            attributes,
            &scenario.cohort.entry_times,
            scenario.simulation,
        )
    }

    /// Processes events until the queue is empty.
    ///
    /// Calling `run` again afterwards processes nothing.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        let mut events_processed = 0;
        while self.step()?.is_some() {
            events_processed += 1;
        }

        tracing::info!(
            events = events_processed,
            transitions = self.history.len(),
            clock = self.clock.value(),
            "Simulation complete"
        );

        Ok(RunSummary {
            events_processed,
            final_clock: self.clock,
        })
    }

    /// Pops the earliest event, advances the clock to it and processes it.
    /// Returns `None` once the queue is empty.
    pub fn step(&mut self) -> Result<Option<Event>, SimulationError> {
        if self.queue.is_empty() {
            return Ok(None);
        }
        let event = self.queue.pop_earliest()?;
        self.clock = event.time;
        self.process(event)?;
        Ok(Some(event))
    }

    /// Samples the individual's next transition from the event's state,
    /// records it and schedules the arrival.
    fn process(&mut self, event: Event) -> Result<(), SimulationError> {
        let attributes = self.attributes.row(event.individual)?;
        let state = self.registry.get(event.state)?;
        let origin = self.time_scale.origin(&event);

        let Some(arrival) = state.next_arrival(attributes, event.time, origin, &mut self.rng)
        else {
            tracing::trace!(individual = %event.individual, state = %event.state, "Absorbed");
            return Ok(());
        };

        if arrival.time < self.clock {
            return Err(SimulationError::NonCausalEvent {
                individual: event.individual,
                state: arrival.destination,
                requested: arrival.time,
                current: self.clock,
            });
        }

        tracing::trace!(
            individual = %event.individual,
            from = %event.state,
            to = %arrival.destination,
            time = arrival.time.value(),
            "Transition"
        );

        self.history.push(HistoryEntry::new(
            event.individual,
            arrival.destination,
            arrival.time,
        ));
        self.queue.push(event.next(arrival.destination, arrival.time));
        Ok(())
    }

    /// Time of the next pending event.
    pub fn next_event_time(&self) -> Result<SimTime, SimulationError> {
        self.queue.peek_earliest_time()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time of the most recently processed event.
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn individuals(&self) -> usize {
        self.individuals
    }

    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self, id: StateId) -> Result<&State, SimulationError> {
        self.registry.get(id)
    }

    pub fn attributes_of(&self, individual: IndividualId) -> Result<&[f64], SimulationError> {
        self.attributes.row(individual)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }
}

fn check_coefficient_widths(registry: &Registry, width: usize) -> Result<(), ConfigurationError> {
    for state in registry.iter() {
        for transition in state.transitions() {
            for parameter in transition.kind().parameters() {
                if parameter.coefficients.width() != width {
                    return Err(ConfigurationError::CoefficientWidth {
                        source_state: state.id(),
                        destination: transition.destination(),
                        parameter: parameter.name.to_string(),
                        expected: width,
                        found: parameter.coefficients.width(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(delay: f64) -> TransitionSpec {
        TransitionSpec::new("fixed").with("delay", vec![delay])
    }

    fn two_state(entry_times: &[f64]) -> Simulation {
        Simulation::from_matrix(
            &[vec![0, 1], vec![0, 0]],
            &[fixed(5.0)],
            AttributeTable::intercept_only(entry_times.len()),
            entry_times,
            SimulationOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_seeding() {
        let sim = two_state(&[0.0, 2.0, 1.0]);
        assert_eq!(sim.pending_events(), 3);
        assert_eq!(sim.clock(), SimTime::ZERO);
        assert_eq!(sim.next_event_time().unwrap(), SimTime::ZERO);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_single_transition() {
        let mut sim = two_state(&[0.0]);
        let summary = sim.run().unwrap();

        assert_eq!(summary.events_processed, 2);
        assert_eq!(summary.final_clock, SimTime::new(5.0));
        assert_eq!(
            sim.history().to_vec(),
            vec![HistoryEntry::new(IndividualId(0), StateId(1), SimTime::new(5.0))]
        );
        assert!(sim.is_done());
        assert_eq!(sim.next_event_time().unwrap_err(), SimulationError::EmptyQueue);
    }

    #[test]
    fn test_step_by_step() {
        let mut sim = two_state(&[1.0]);

        let first = sim.step().unwrap().unwrap();
        assert_eq!(first.state, StateId(0));
        assert_eq!(sim.clock(), SimTime::new(1.0));
        assert_eq!(sim.pending_events(), 1);

        let second = sim.step().unwrap().unwrap();
        assert_eq!(second.state, StateId(1));
        assert_eq!(sim.clock(), SimTime::new(6.0));

        assert!(sim.step().unwrap().is_none());
    }

    #[test]
    fn test_run_twice_is_noop() {
        let mut sim = two_state(&[0.0, 3.0]);
        sim.run().unwrap();
        let before = sim.history().to_vec();

        let again = sim.run().unwrap();
        assert_eq!(again.events_processed, 0);
        assert_eq!(sim.history().to_vec(), before);
    }

    #[test]
    fn test_missing_attributes() {
        let err = Simulation::from_matrix(
            &[vec![0, 1], vec![0, 0]],
            &[fixed(5.0)],
            AttributeTable::intercept_only(1),
            &[0.0, 1.0],
            SimulationOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingAttributes {
                individuals: 2,
                rows: 1,
            }
        );
    }

    #[test]
    fn test_coefficient_width_checked() {
        let err = Simulation::from_matrix(
            &[vec![0, 1], vec![0, 0]],
            &[TransitionSpec::new("fixed").with("delay", vec![5.0, 1.0])],
            AttributeTable::intercept_only(1),
            &[0.0],
            SimulationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::CoefficientWidth {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_entry_time() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = Simulation::from_matrix(
                &[vec![0, 1], vec![0, 0]],
                &[fixed(5.0)],
                AttributeTable::intercept_only(1),
                &[bad],
                SimulationOptions::default(),
            )
            .unwrap_err();
            assert!(matches!(err, ConfigurationError::InvalidEntryTime { .. }));
        }
    }

    #[test]
    fn test_negative_delay_is_non_causal() {
        let mut sim = Simulation::from_matrix(
            &[vec![0, 1], vec![0, 0]],
            &[fixed(-2.0)],
            AttributeTable::intercept_only(1),
            &[4.0],
            SimulationOptions::default(),
        )
        .unwrap();

        let err = sim.run().unwrap_err();
        assert_eq!(
            err,
            SimulationError::NonCausalEvent {
                individual: IndividualId(0),
                state: StateId(1),
                requested: SimTime::new(2.0),
                current: SimTime::new(4.0),
            }
        );
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_accessors() {
        let sim = Simulation::from_matrix(
            &[vec![0, 1], vec![0, 0]],
            &[TransitionSpec::new("fixed").with("delay", vec![1.0, 0.5])],
            AttributeTable::from_rows(vec![vec![1.0, 2.0], vec![1.0, 4.0]]).unwrap(),
            &[0.0, 0.0],
            SimulationOptions::default(),
        )
        .unwrap();

        assert_eq!(sim.attributes_of(IndividualId(1)).unwrap(), &[1.0, 4.0]);
        assert!(sim.attributes_of(IndividualId(2)).is_err());
        assert!(sim.state(StateId(1)).unwrap().is_absorbing());
        assert!(sim.state(StateId(2)).is_err());
        assert_eq!(sim.individuals(), 2);
        assert_eq!(sim.time_scale(), TimeScale::ClockReset);
    }

    #[test]
    fn test_attribute_dependent_delay() {
        let mut sim = Simulation::from_matrix(
            &[vec![0, 1], vec![0, 0]],
            &[TransitionSpec::new("fixed").with("delay", vec![1.0, 0.5])],
            AttributeTable::from_rows(vec![vec![1.0, 2.0], vec![1.0, 4.0]]).unwrap(),
            &[0.0, 0.0],
            SimulationOptions::default(),
        )
        .unwrap();
        sim.run().unwrap();

        let history = sim.into_history();
        assert_eq!(history.for_individual(IndividualId(0))[0].time, SimTime::new(2.0));
        assert_eq!(history.for_individual(IndividualId(1))[0].time, SimTime::new(3.0));
    }
}
