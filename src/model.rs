//! Domain model: sections, trains, the network, and scheduled items (C1).
//!
//! All entities are value-typed and immutable for the duration of one
//! scheduling call; the core keeps no state across calls.

use crate::error::{ScheduleError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type SectionId = String;
pub type TrainId = String;
pub type GroupId = String;

/// A track resource trains traverse in sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    /// Minimum time from one train's exit to the next train's entry.
    pub headway_seconds: u64,
    /// Fixed traversal duration.
    pub traverse_seconds: u64,
    /// Half-open `[a, b)` intervals during which the section is unavailable.
    #[serde(default)]
    pub block_windows: Vec<(u64, u64)>,
    /// Number of parallel platform slots competing for pre-entry dwell.
    #[serde(default)]
    pub platform_capacity: Option<u32>,
    /// Other section id -> required clearance seconds between any entry on
    /// this section and any entry on the other section.
    #[serde(default)]
    pub conflicts_with: IndexMap<SectionId, u64>,
    /// Group id -> clearance seconds; sections sharing a group id require
    /// the max of their declared clearances between any pair of entries.
    #[serde(default)]
    pub conflict_groups: IndexMap<GroupId, u64>,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<SectionId>, headway_seconds: u64, traverse_seconds: u64) -> Self {
        Self {
            id: id.into(),
            headway_seconds,
            traverse_seconds,
            block_windows: Vec::new(),
            platform_capacity: None,
            conflicts_with: IndexMap::new(),
            conflict_groups: IndexMap::new(),
        }
    }
}

/// A request for one train to traverse an ordered route of sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRequest {
    pub id: TrainId,
    /// Higher priority is more important; used as the primary greedy sort
    /// key and as the MIP objective weight.
    pub priority: u32,
    pub route_sections: Vec<SectionId>,
    /// Earliest allowed entry time on the first section.
    pub planned_departure: u64,
    /// Section id -> seconds the train must dwell immediately before
    /// entering that section.
    #[serde(default)]
    pub dwell_before: IndexMap<SectionId, u64>,
    /// Target time for the terminal-section entry; lateness beyond this is
    /// penalized by the MIP objective and reported by the KPI computer.
    #[serde(default)]
    pub due_time: Option<u64>,
}

impl TrainRequest {
    #[must_use]
    pub fn dwell_before(&self, section_id: &str) -> u64 {
        self.dwell_before.get(section_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn terminal_section(&self) -> Option<&str> {
        self.route_sections.last().map(String::as_str)
    }
}

/// A fully-placed schedule entry, tagged with the train and section it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub train_id: TrainId,
    pub section_id: SectionId,
    pub entry: u64,
    pub exit: u64,
}

pub type Schedule = Vec<PlacedItem>;

/// Value-type aggregate of the sections a scenario's trains run over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    sections: IndexMap<SectionId, Section>,
}

impl Network {
    /// Build a network from a section list, failing if two sections share
    /// an id.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(sections.len());
        for section in sections {
            if map.insert(section.id.clone(), section).is_some() {
                return Err(ScheduleError::InvalidInput(format!(
                    "duplicate section id `{}`",
                    map.get_index(map.len() - 1).map_or_else(String::new, |(k, _)| k.clone())
                )));
            }
        }
        Ok(Self { sections: map })
    }

    /// Look up a section by id, failing with `UnknownSection` otherwise.
    pub fn lookup(&self, id: &str) -> Result<&Section> {
        self.sections
            .get(id)
            .ok_or_else(|| ScheduleError::UnknownSection(id.to_string()))
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Validate a train set against a network per spec.md §3's invariants:
/// every referenced section exists, routes are non-empty, dwell keys
/// belong to the train's route, ids are unique.
pub fn validate_trains(network: &Network, trains: &[TrainRequest]) -> Result<()> {
    let mut seen_ids = IndexMap::new();
    for train in trains {
        if seen_ids.insert(train.id.clone(), ()).is_some() {
            return Err(ScheduleError::InvalidInput(format!(
                "duplicate train id `{}`",
                train.id
            )));
        }
        if train.route_sections.is_empty() {
            return Err(ScheduleError::InvalidInput(format!(
                "train `{}` has an empty route",
                train.id
            )));
        }
        if train.priority == 0 {
            return Err(ScheduleError::InvalidInput(format!(
                "train `{}` priority must be positive",
                train.id
            )));
        }
        for section_id in &train.route_sections {
            network.lookup(section_id)?;
        }
        for dwell_section in train.dwell_before.keys() {
            if !train.route_sections.iter().any(|s| s == dwell_section) {
                return Err(ScheduleError::InvalidInput(format!(
                    "train `{}` has dwell_before for `{dwell_section}` which is not on its route",
                    train.id
                )));
            }
        }
    }
    for section in network.sections() {
        for &(a, b) in &section.block_windows {
            if a >= b {
                return Err(ScheduleError::InvalidInput(format!(
                    "section `{}` has a malformed block window [{a}, {b})",
                    section.id
                )));
            }
        }
        for other in section.conflicts_with.keys() {
            network.lookup(other)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_rejects_duplicate_section_ids() {
        let err = Network::new(vec![
            Section::new("S1", 0, 10),
            Section::new("S1", 0, 20),
        ])
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn lookup_fails_for_unknown_section() {
        let net = Network::new(vec![Section::new("S1", 0, 10)]).unwrap();
        let err = net.lookup("S2").unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownSection(ref s) if s == "S2"));
    }

    #[test]
    fn validate_trains_rejects_unknown_route_section() {
        let net = Network::new(vec![Section::new("S1", 0, 10)]).unwrap();
        let train = TrainRequest {
            id: "T1".into(),
            priority: 1,
            route_sections: vec!["S2".into()],
            planned_departure: 0,
            dwell_before: IndexMap::new(),
            due_time: None,
        };
        let err = validate_trains(&net, &[train]).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownSection(_)));
    }

    #[test]
    fn validate_trains_rejects_dwell_key_off_route() {
        let net = Network::new(vec![
            Section::new("S1", 0, 10),
            Section::new("S2", 0, 10),
        ])
        .unwrap();
        let mut dwell = IndexMap::new();
        dwell.insert("S2".to_string(), 30);
        let train = TrainRequest {
            id: "T1".into(),
            priority: 1,
            route_sections: vec!["S1".into()],
            planned_departure: 0,
            dwell_before: dwell,
            due_time: None,
        };
        let err = validate_trains(&net, &[train]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn validate_trains_rejects_duplicate_train_ids() {
        let net = Network::new(vec![Section::new("S1", 0, 10)]).unwrap();
        let mk = || TrainRequest {
            id: "T1".into(),
            priority: 1,
            route_sections: vec!["S1".into()],
            planned_departure: 0,
            dwell_before: IndexMap::new(),
            due_time: None,
        };
        let err = validate_trains(&net, &[mk(), mk()]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }
}
