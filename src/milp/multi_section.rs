//! Homogeneous multi-section formulation: every train shares the same
//! route of length ≥ 2. The shared builder handles this without special
//! casing; this entry point documents and asserts the precondition.

use super::common::build_and_solve;
use crate::error::Result;
use crate::model::{Network, Schedule, TrainRequest};

pub fn solve(trains: &[TrainRequest], network: &Network, time_limit: Option<u64>) -> Result<Schedule> {
    debug_assert!(match trains.first() {
        None => true,
        Some(first) => trains
            .iter()
            .all(|t| t.route_sections == first.route_sections && t.route_sections.len() >= 2),
    });
    build_and_solve(trains, network, time_limit)
}
