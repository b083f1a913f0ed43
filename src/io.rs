//! External interface shapes (C8): the JSON-like payloads a caller
//! (HTTP layer, persistence, UI) sends into and reads out of the core.
//! Unknown fields on train objects are ignored silently — serde's
//! default "ignore unknown fields" behavior on a non-`deny_unknown_fields`
//! struct already gives us that, no allow-list needed.

use crate::kpi::KpiReport;
use crate::model::{GroupId, Network, Section, SectionId, TrainId, TrainRequest};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionPayload {
    pub id: SectionId,
    pub headway_seconds: u64,
    pub traverse_seconds: u64,
    #[serde(default)]
    pub block_windows: Vec<(u64, u64)>,
    #[serde(default)]
    pub platform_capacity: Option<u32>,
    #[serde(default)]
    pub conflicts_with: IndexMap<SectionId, u64>,
    #[serde(default)]
    pub conflict_groups: IndexMap<GroupId, u64>,
}

impl From<SectionPayload> for Section {
    fn from(p: SectionPayload) -> Self {
        Section {
            id: p.id,
            headway_seconds: p.headway_seconds,
            traverse_seconds: p.traverse_seconds,
            block_windows: p.block_windows,
            platform_capacity: p.platform_capacity,
            conflicts_with: p.conflicts_with,
            conflict_groups: p.conflict_groups,
        }
    }
}

/// Extra fields on the wire are dropped on the floor, matching the
/// sanitize-to-documented-keys behavior required of the core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainPayload {
    pub id: TrainId,
    pub priority: u32,
    pub planned_departure: u64,
    pub route_sections: Vec<SectionId>,
    #[serde(default)]
    pub dwell_before: IndexMap<SectionId, u64>,
    #[serde(default)]
    pub due_time: Option<u64>,
}

impl From<TrainPayload> for TrainRequest {
    fn from(p: TrainPayload) -> Self {
        TrainRequest {
            id: p.id,
            priority: p.priority,
            route_sections: p.route_sections,
            planned_departure: p.planned_departure,
            dwell_before: p.dwell_before,
            due_time: p.due_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioPayload {
    pub sections: Vec<SectionPayload>,
    pub trains: Vec<TrainPayload>,
}

impl ScenarioPayload {
    pub fn into_domain(self) -> crate::error::Result<(Network, Vec<TrainRequest>)> {
        let sections = self.sections.into_iter().map(Section::from).collect();
        let trains = self.trains.into_iter().map(TrainRequest::from).collect();
        Ok((Network::new(sections)?, trains))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItemPayload {
    pub train_id: TrainId,
    pub section_id: SectionId,
    pub entry: u64,
    pub exit: u64,
}

impl From<&crate::model::PlacedItem> for ScheduleItemPayload {
    fn from(item: &crate::model::PlacedItem) -> Self {
        ScheduleItemPayload {
            train_id: item.train_id.clone(),
            section_id: item.section_id.clone(),
            entry: item.entry,
            exit: item.exit,
        }
    }
}

pub type KpiMap = KpiReport;

/// Solver-selection parameters passed alongside the scenario payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverSelection {
    Greedy,
    Mip,
}

impl From<SolverSelection> for crate::dispatch::SolverMode {
    fn from(s: SolverSelection) -> Self {
        match s {
            SolverSelection::Greedy => crate::dispatch::SolverMode::Greedy,
            SolverSelection::Mip => crate::dispatch::SolverMode::Mip,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverParams {
    pub solver: SolverSelection,
    #[serde(default)]
    pub otp_tolerance: u64,
    #[serde(default)]
    pub milp_time_limit: Option<u64>,
}

/// The predictor-adjacent conflict record the "resolve" path consumes.
/// The predictor itself (baseline linear / MLP / GNN delay models) is an
/// external collaborator, opaque to this core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictedConflict {
    pub section_id: SectionId,
    pub trains: Vec<TrainId>,
    #[serde(default)]
    pub etas: Option<Vec<f64>>,
    #[serde(default)]
    pub gap_seconds: Option<f64>,
}
