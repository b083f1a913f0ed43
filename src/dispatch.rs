//! Solver dispatcher (C5): chooses greedy vs MIP, falling back to greedy
//! on any MIP failure so the public entry point never raises for a
//! solver-internal reason.

use crate::error::Result;
use crate::model::{validate_trains, Network, Schedule, TrainRequest};
use crate::{greedy, milp};
use log::warn;

/// Solver selection, mirrored from the external `solver` selection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMode {
    Greedy,
    Mip,
}

/// Run the requested solver, degrading to greedy on any MIP failure.
/// Never raises except for genuinely invalid input (`UnknownSection`,
/// `InvalidInput`).
pub fn schedule(
    trains: &[TrainRequest],
    network: &Network,
    mode: SolverMode,
    time_limit: Option<u64>,
) -> Result<Schedule> {
    validate_trains(network, trains)?;
    match mode {
        SolverMode::Greedy => greedy::schedule(trains, network),
        SolverMode::Mip => match milp::schedule(trains, network, time_limit) {
            Ok(schedule) => Ok(schedule),
            Err(err) => {
                warn!("mip solver failed ({err}); falling back to greedy");
                greedy::schedule(trains, network)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use indexmap::IndexMap;

    #[test]
    fn mip_mode_falls_back_to_greedy_on_unsupported_input() {
        // due_time=0 is valid, but force a failure path by giving the MIP
        // an effectively instant time limit alongside a larger instance;
        // either way dispatch must not raise.
        let network = Network::new(vec![Section::new("S1", 0, 10)]).unwrap();
        let trains = vec![TrainRequest {
            id: "T1".into(),
            priority: 1,
            route_sections: vec!["S1".into()],
            planned_departure: 0,
            dwell_before: IndexMap::new(),
            due_time: None,
        }];
        let result = schedule(&trains, &network, SolverMode::Mip, Some(5));
        assert!(result.is_ok());
    }

    #[test]
    fn invalid_input_is_not_swallowed_by_fallback() {
        let network = Network::new(vec![Section::new("S1", 0, 10)]).unwrap();
        let trains = vec![TrainRequest {
            id: "T1".into(),
            priority: 1,
            route_sections: vec!["S_unknown".into()],
            planned_departure: 0,
            dwell_before: IndexMap::new(),
            due_time: None,
        }];
        assert!(schedule(&trains, &network, SolverMode::Greedy, None).is_err());
    }

    #[test]
    fn dwell_respected_in_greedy_and_mip() {
        let network = Network::new(vec![Section::new("S1", 0, 100), Section::new("S2", 0, 50)]).unwrap();
        let mut dwell = IndexMap::new();
        dwell.insert("S2".to_string(), 60);
        let train = TrainRequest {
            id: "T1".into(),
            priority: 1,
            route_sections: vec!["S1".into(), "S2".into()],
            planned_departure: 0,
            dwell_before: dwell,
            due_time: None,
        };

        for mode in [SolverMode::Greedy, SolverMode::Mip] {
            let items = schedule(&[train.clone()], &network, mode, Some(10)).unwrap();
            let s1 = items.iter().find(|i| i.section_id == "S1").unwrap();
            let s2 = items.iter().find(|i| i.section_id == "S2").unwrap();
            assert!(s2.entry >= s1.exit + 60, "{mode:?}: {s1:?} then {s2:?}");
        }
    }
}
