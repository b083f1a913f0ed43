//! Single-section formulation: every train's route is exactly one section,
//! so within-train precedence never applies — the shared builder already
//! degrades to this automatically, this entry point only documents and
//! asserts the precondition.

use super::common::build_and_solve;
use crate::error::Result;
use crate::model::{Network, Schedule, TrainRequest};

pub fn solve(trains: &[TrainRequest], network: &Network, time_limit: Option<u64>) -> Result<Schedule> {
    debug_assert!(trains.iter().all(|t| t.route_sections.len() == 1));
    build_and_solve(trains, network, time_limit)
}
