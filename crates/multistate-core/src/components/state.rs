//! State Component
//!
//! A process state and its outgoing transitions.

use rand::Rng;

use multistate_events::{SimTime, StateId};

use crate::transition::{Arrival, Transition};

/// A process state. Its `id` equals its position in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    id: StateId,
    transitions: Vec<Transition>,
}

impl State {
    pub fn new(id: StateId) -> Self {
        Self {
            id,
            transitions: Vec::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// Appends an outgoing edge. Only used while the registry is built.
    pub(crate) fn add_transition(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Absorbing states have no outgoing transitions.
    pub fn is_absorbing(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Competing risks: samples every outgoing transition and keeps the
    /// earliest finite arrival. Ties go to the edge listed first.
    pub fn next_arrival<R: Rng + ?Sized>(
        &self,
        attributes: &[f64],
        now: SimTime,
        origin: SimTime,
        rng: &mut R,
    ) -> Option<Arrival> {
        let mut earliest: Option<Arrival> = None;
        for transition in &self.transitions {
            let Some(arrival) = transition.evaluate(attributes, now, origin, rng) else {
                continue;
            };
            if earliest.map_or(true, |best| arrival.time < best.time) {
                earliest = Some(arrival);
            }
        }
        earliest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::TransitionSpec;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fixed(destination: usize, delay: f64) -> Transition {
        let spec = TransitionSpec::new("fixed").with("delay", vec![delay]);
        Transition::create(&spec, StateId(destination)).unwrap()
    }

    #[test]
    fn test_absorbing_state() {
        let state = State::new(StateId(2));
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(state.is_absorbing());
        assert!(state
            .next_arrival(&[1.0], SimTime::ZERO, SimTime::ZERO, &mut rng)
            .is_none());
    }

    #[test]
    fn test_competing_risks_picks_earliest() {
        let mut state = State::new(StateId(0));
        state.add_transition(fixed(1, 8.0));
        state.add_transition(fixed(2, 3.0));
        state.add_transition(fixed(3, 5.0));

        let mut rng = SmallRng::seed_from_u64(0);
        let arrival = state
            .next_arrival(&[1.0], SimTime::ZERO, SimTime::ZERO, &mut rng)
            .unwrap();
        assert_eq!(arrival.destination, StateId(2));
        assert_eq!(arrival.time, SimTime::new(3.0));
    }

    #[test]
    fn test_tie_goes_to_first_edge() {
        let mut state = State::new(StateId(0));
        state.add_transition(fixed(1, 4.0));
        state.add_transition(fixed(2, 4.0));

        let mut rng = SmallRng::seed_from_u64(0);
        let arrival = state
            .next_arrival(&[1.0], SimTime::ZERO, SimTime::ZERO, &mut rng)
            .unwrap();
        assert_eq!(arrival.destination, StateId(1));
    }
}
