//! Scenario evaluator (C7): the two externally-triggered operations that
//! wrap pre-processing (hold application, conflict-subset selection)
//! around a full `schedule` + KPI call.

use crate::dispatch::{self, SolverMode};
use crate::error::Result;
use crate::io::PredictedConflict;
use crate::kpi::{self, KpiReport};
use crate::model::{Network, Schedule, Section, TrainId, TrainRequest};
use indexmap::IndexSet;

/// `hold-apply-and-reschedule`: add `add_seconds` to the named trains'
/// `planned_departure`, then re-schedule the full train set.
pub fn apply_hold_and_reschedule(
    trains: &[TrainRequest],
    network: &Network,
    mode: SolverMode,
    time_limit: Option<u64>,
    holds: &[(TrainId, u64)],
    otp_tolerance: u64,
) -> Result<(Schedule, KpiReport)> {
    let mut adjusted: Vec<TrainRequest> = trains.to_vec();
    for train in &mut adjusted {
        if let Some(&(_, add_seconds)) = holds.iter().find(|(id, _)| id == &train.id) {
            train.planned_departure += add_seconds;
        }
    }
    let schedule = dispatch::schedule(&adjusted, network, mode, time_limit)?;
    let kpis = kpi::compute(&schedule, &adjusted, otp_tolerance);
    Ok((schedule, kpis))
}

/// `conflict-subset resolve`: schedule only the trains named by a set of
/// predicted conflicts (and the sections their routes touch). An empty
/// conflict list schedules the whole scenario.
pub fn resolve_conflicts(
    trains: &[TrainRequest],
    network: &Network,
    mode: SolverMode,
    time_limit: Option<u64>,
    conflicts: &[PredictedConflict],
    otp_tolerance: u64,
) -> Result<(Schedule, KpiReport)> {
    if conflicts.is_empty() {
        let schedule = dispatch::schedule(trains, network, mode, time_limit)?;
        let kpis = kpi::compute(&schedule, trains, otp_tolerance);
        return Ok((schedule, kpis));
    }

    let involved: IndexSet<&str> = conflicts
        .iter()
        .flat_map(|c| c.trains.iter().map(String::as_str))
        .collect();
    let subset_trains: Vec<TrainRequest> = trains
        .iter()
        .filter(|t| involved.contains(t.id.as_str()))
        .cloned()
        .collect();

    let touched_sections: IndexSet<&str> = subset_trains
        .iter()
        .flat_map(|t| t.route_sections.iter().map(String::as_str))
        .collect();
    let subset_sections: Vec<Section> = network
        .sections()
        .filter(|s| touched_sections.contains(s.id.as_str()))
        .cloned()
        .collect();
    let subset_network = Network::new(subset_sections)?;

    let schedule = dispatch::schedule(&subset_trains, &subset_network, mode, time_limit)?;
    let kpis = kpi::compute(&schedule, &subset_trains, otp_tolerance);
    Ok((schedule, kpis))
}
