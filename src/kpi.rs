//! KPI computer (C6): makespan, utilization proxy, per-train terminal
//! lateness, and on-time performance at a caller-chosen tolerance.

use crate::model::{Schedule, TrainId, TrainRequest};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// The public KPI map (§4.5 / §6). Optional fields are omitted from the
/// serialized form rather than emitted as `null` when inapplicable.
#[derive(Debug, Clone, Serialize)]
pub struct KpiReport {
    pub total_trains: usize,
    pub makespan: u64,
    pub utilization: u64,
    pub conflicts: u64,
    pub otp_tolerance_used: u64,
    /// `0.0` when there are no due-timed trains (spec.md §4.5), not omitted.
    pub otp_end: f64,
    pub otp0_end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_lateness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lateness: Option<u64>,
    pub on_time_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_delay_minutes: Option<f64>,
    pub lateness_by_train: IndexMap<TrainId, u64>,
}

#[must_use]
pub fn compute(schedule: &Schedule, trains: &[TrainRequest], otp_tolerance: u64) -> KpiReport {
    let train_ids: IndexSet<&str> = schedule.iter().map(|i| i.train_id.as_str()).collect();
    let total_trains = train_ids.len();

    let makespan = if schedule.is_empty() {
        0
    } else {
        let max_exit = schedule.iter().map(|i| i.exit).max().unwrap_or(0);
        let min_entry = schedule.iter().map(|i| i.entry).min().unwrap_or(0);
        max_exit - min_entry
    };

    let utilization = if makespan == 0 {
        0
    } else {
        let occupied: u64 = schedule.iter().map(|i| i.exit - i.entry).sum();
        (100 * occupied / makespan).min(100)
    };

    // P8: lateness is read from the *first* matching terminal entry.
    let mut lateness_by_train: IndexMap<TrainId, u64> = IndexMap::new();
    for train in trains {
        let (Some(due), Some(terminal)) = (train.due_time, train.terminal_section()) else {
            continue;
        };
        if let Some(item) = schedule
            .iter()
            .find(|i| i.train_id == train.id && i.section_id == terminal)
        {
            lateness_by_train.insert(train.id.clone(), item.entry.saturating_sub(due));
        }
    }

    // otp_end/otp0_end are 0 rather than omitted when there are no
    // due-timed trains (spec.md §4.5); avg/total lateness are inapplicable
    // in that case and stay `None`.
    let (avg_lateness, total_lateness, otp_end, otp0_end) = if lateness_by_train.is_empty() {
        (None, None, 0.0, 0.0)
    } else {
        let n = lateness_by_train.len() as f64;
        let total: u64 = lateness_by_train.values().sum();
        let otp_at = |tolerance: u64| {
            let on_time = lateness_by_train.values().filter(|&&l| l <= tolerance).count();
            100.0 * on_time as f64 / n
        };
        (Some(total as f64 / n), Some(total), otp_at(otp_tolerance), otp_at(0))
    };

    KpiReport {
        total_trains,
        makespan,
        utilization,
        conflicts: 0,
        otp_tolerance_used: otp_tolerance,
        otp_end,
        otp0_end,
        avg_lateness,
        total_lateness,
        on_time_percentage: otp_end,
        avg_delay_minutes: avg_lateness.map(|a| (a / 60.0 * 1000.0).round() / 1000.0),
        lateness_by_train,
    }
}
