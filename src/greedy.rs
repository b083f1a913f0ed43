//! Priority-ordered greedy constructive scheduler (C3).
//!
//! Ignores platform capacity, `conflicts_with`, and `conflict_groups` by
//! design — those constraints are only enforced by the MIP path (see
//! spec's Open Questions; this is a documented discrepancy with the MIP
//! path carried over from the source implementation, not an oversight).
//! The greedy scheduler cannot fail on valid input: every constraint it
//! does not understand is simply not checked, so it always returns.

use crate::error::Result;
use crate::interval_store::{Interval, IntervalStore};
use crate::model::{Network, PlacedItem, Schedule, TrainRequest};
use indexmap::IndexMap;
use log::debug;

/// Run the greedy scheduler over `trains`, returning schedule items in
/// production order (train placement order, then route order) — not
/// re-sorted by section/entry, unlike the MIP path.
pub fn schedule(trains: &[TrainRequest], network: &Network) -> Result<Schedule> {
    let mut order: Vec<&TrainRequest> = trains.iter().collect();
    // Stable sort: priority descending, planned_departure ascending, ties
    // keep input order.
    order.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.planned_departure.cmp(&b.planned_departure))
    });

    let mut occupancy: IndexMap<&str, IntervalStore> = network
        .sections()
        .map(|s| (s.id.as_str(), IntervalStore::new()))
        .collect();

    let mut result = Vec::new();
    for train in order {
        let mut prev_exit = train.planned_departure;
        for (k, section_id) in train.route_sections.iter().enumerate() {
            let section = network.lookup(section_id)?;
            let dwell = if k == 0 { 0 } else { train.dwell_before(section_id) };
            let candidate = prev_exit
                .saturating_add(dwell)
                .max(train.planned_departure);

            let store = occupancy
                .get_mut(section_id.as_str())
                .expect("section validated to exist against the network");
            let entry = store.find_earliest(
                candidate,
                section.headway_seconds,
                section.traverse_seconds,
                &section.block_windows,
            );
            let exit = entry + section.traverse_seconds;

            debug!(
                "greedy: train {} section {} entry={} exit={}",
                train.id, section_id, entry, exit
            );

            store.insert(Interval { entry, exit });
            result.push(PlacedItem {
                train_id: train.id.clone(),
                section_id: section_id.clone(),
                entry,
                exit,
            });

            prev_exit = exit + section.headway_seconds;
        }
    }
    Ok(result)
}
