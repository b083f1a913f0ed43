//! Heterogeneous-route formulation: trains whose routes differ in length
//! or content. This is the general case the shared builder implements
//! directly; single- and homogeneous-multi-section are degenerate
//! instances of it.

use super::common::build_and_solve;
use crate::error::Result;
use crate::model::{Network, Schedule, TrainRequest};

pub fn solve(trains: &[TrainRequest], network: &Network, time_limit: Option<u64>) -> Result<Schedule> {
    build_and_solve(trains, network, time_limit)
}
