//! Occupancy Statistics
//!
//! Per-state summaries of a finished history.

use serde::Serialize;

use multistate_events::{History, StateId};

/// Summary for one state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateOccupancy {
    pub state: usize,
    /// Number of recorded arrivals into this state
    pub arrivals: usize,
    /// Individuals whose last recorded state is this one; those with no
    /// history count toward the entry state
    pub final_occupants: usize,
    /// Mean arrival time, if anyone arrived
    pub mean_arrival_time: Option<f64>,
}

/// Occupancy of every state after a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OccupancySummary {
    pub total_transitions: usize,
    pub states: Vec<StateOccupancy>,
}

impl OccupancySummary {
    /// Summarizes `history` for a cohort of `individuals` over `n_states`
    /// states. Entries pointing past either bound are ignored.
    pub fn from_history(history: &History, n_states: usize, individuals: usize) -> Self {
        let mut states: Vec<StateOccupancy> = (0..n_states)
            .map(|state| StateOccupancy {
                state,
                ..Default::default()
            })
            .collect();
        let mut time_sums = vec![0.0; n_states];
        let mut last_state = vec![StateId::ENTRY; individuals];

        for entry in history {
            let Some(occupancy) = states.get_mut(entry.state.index()) else {
                continue;
            };
            occupancy.arrivals += 1;
            time_sums[entry.state.index()] += entry.time.value();
            // Later arrivals for an individual always append after earlier ones.
            if let Some(last) = last_state.get_mut(entry.individual.index()) {
                *last = entry.state;
            }
        }

        for state in last_state {
            if let Some(occupancy) = states.get_mut(state.index()) {
                occupancy.final_occupants += 1;
            }
        }
        for (occupancy, sum) in states.iter_mut().zip(time_sums) {
            if occupancy.arrivals > 0 {
                occupancy.mean_arrival_time = Some(sum / occupancy.arrivals as f64);
            }
        }

        Self {
            total_transitions: history.len(),
            states,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multistate_events::{HistoryEntry, IndividualId, SimTime};

    #[test]
    fn test_summary() {
        let mut history = History::new();
        history.push(HistoryEntry::new(IndividualId(0), StateId(1), SimTime::new(2.0)));
        history.push(HistoryEntry::new(IndividualId(1), StateId(2), SimTime::new(3.0)));
        history.push(HistoryEntry::new(IndividualId(0), StateId(2), SimTime::new(5.0)));

        let summary = OccupancySummary::from_history(&history, 3, 2);
        assert_eq!(summary.total_transitions, 3);
        assert_eq!(summary.states[0].arrivals, 0);
        assert_eq!(summary.states[0].final_occupants, 0);
        assert_eq!(summary.states[0].mean_arrival_time, None);
        assert_eq!(summary.states[1].arrivals, 1);
        assert_eq!(summary.states[1].final_occupants, 0);
        assert_eq!(summary.states[2].arrivals, 2);
        assert_eq!(summary.states[2].final_occupants, 2);
        assert_eq!(summary.states[2].mean_arrival_time, Some(4.0));
    }

    #[test]
    fn test_individuals_without_history_stay_in_entry_state() {
        let mut history = History::new();
        history.push(HistoryEntry::new(IndividualId(1), StateId(1), SimTime::new(2.0)));

        let summary = OccupancySummary::from_history(&history, 2, 4);
        assert_eq!(summary.states[0].final_occupants, 3);
        assert_eq!(summary.states[1].final_occupants, 1);
        let total: usize = summary.states.iter().map(|s| s.final_occupants).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_json() {
        let summary = OccupancySummary::from_history(&History::new(), 2, 0);
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"total_transitions\": 0"));
    }
}
