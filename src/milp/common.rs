//! Shared disjunctive model builder for the three MIP formulations (C4).
//!
//! A single-section route has no legs past index 0, so precedence
//! constraints never fire for it; a homogeneous multi-section fleet is a
//! heterogeneous fleet whose routes happen to match. All three dispatch
//! entry points therefore build the same model; what differs between
//! `single_section`, `multi_section`, and `hetero` is only the
//! precondition each asserts before delegating here.

use super::solver::Model;
use crate::error::Result;
use crate::model::{Network, PlacedItem, Schedule, TrainRequest};
use good_lp::Variable;
use indexmap::IndexMap;

/// `M ≥ max planned_departure + n · Σ_s (D[s] + H[s]) + slack`.
fn big_m(trains: &[TrainRequest], network: &Network) -> f64 {
    let max_departure = trains.iter().map(|t| t.planned_departure).max().unwrap_or(0);
    let n = trains.len() as u64;
    let sum_dh: u64 = network
        .sections()
        .map(|s| s.traverse_seconds + s.headway_seconds)
        .sum();
    (max_departure + n * sum_dh) as f64 + 1000.0
}

struct Leg {
    train_idx: usize,
    leg_idx: usize,
    section_id: String,
    var: Variable,
}

pub fn build_and_solve(trains: &[TrainRequest], network: &Network, time_limit: Option<u64>) -> Result<Schedule> {
    if trains.is_empty() {
        return Ok(Vec::new());
    }

    let m = big_m(trains, network);
    let mut model = Model::new();

    // One variable per (train, leg); leg 0 is floored at planned_departure.
    let mut legs: Vec<Leg> = Vec::new();
    for (train_idx, train) in trains.iter().enumerate() {
        for (leg_idx, section_id) in train.route_sections.iter().enumerate() {
            let lower = if leg_idx == 0 { train.planned_departure as f64 } else { 0.0 };
            let var = model.add_var(lower);
            legs.push(Leg {
                train_idx,
                leg_idx,
                section_id: section_id.clone(),
                var,
            });
        }
    }

    // Constraint 1: within-train precedence with dwell.
    for train_idx in 0..trains.len() {
        let train = &trains[train_idx];
        let train_legs: Vec<usize> = legs
            .iter()
            .enumerate()
            .filter(|(_, l)| l.train_idx == train_idx)
            .map(|(i, _)| i)
            .collect();
        for w in train_legs.windows(2) {
            let (prev, next) = (w[0], w[1]);
            let prev_section = network.lookup(&legs[prev].section_id)?;
            let dwell = train.dwell_before(&legs[next].section_id);
            model.add_le(
                legs[prev].var + prev_section.traverse_seconds as f64 + dwell as f64,
                legs[next].var,
            );
        }
    }

    // Group leg indices by section for the per-section constraint families.
    let mut by_section: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (i, leg) in legs.iter().enumerate() {
        by_section.entry(leg.section_id.clone()).or_default().push(i);
    }

    // Constraint 2: pairwise non-overlap + headway on each section.
    for (section_id, leg_idxs) in &by_section {
        let section = network.lookup(section_id)?;
        let dh = (section.traverse_seconds + section.headway_seconds) as f64;
        for a in 0..leg_idxs.len() {
            for b in (a + 1)..leg_idxs.len() {
                let (li, lj) = (leg_idxs[a], leg_idxs[b]);
                let y = model.add_binary();
                // s[i] >= s[j] + D + H - M(1-y)
                model.add_le(legs[lj].var + dh - m + m * y, legs[li].var);
                // s[j] >= s[i] + D + H - M*y
                model.add_le(legs[li].var + dh - m * y, legs[lj].var);
            }
        }
    }

    // Constraint 3: block windows.
    for (section_id, leg_idxs) in &by_section {
        let section = network.lookup(section_id)?;
        for &(a, b) in &section.block_windows {
            for &li in leg_idxs {
                let z = model.add_binary();
                // s[leg] + D <= a + M*z
                model.add_le(legs[li].var + section.traverse_seconds as f64, a as f64 + m * z);
                // s[leg] >= b - M*(1-z)
                model.add_le(b as f64 - m + m * z, legs[li].var);
            }
        }
    }

    // Constraint 4: platform capacity.
    for (section_id, leg_idxs) in &by_section {
        let section = network.lookup(section_id)?;
        let Some(capacity) = section.platform_capacity else { continue };
        let dwelling: Vec<(usize, f64)> = leg_idxs
            .iter()
            .filter_map(|&li| {
                let d = trains[legs[li].train_idx].dwell_before(section_id);
                (d > 0).then_some((li, d as f64))
            })
            .collect();

        if capacity <= 1 {
            for a in 0..dwelling.len() {
                for b in (a + 1)..dwelling.len() {
                    let (li, di) = dwelling[a];
                    let (lj, dj) = dwelling[b];
                    let p = model.add_binary();
                    model.add_le(legs[li].var, legs[lj].var - dj + m * (1.0 - p));
                    model.add_le(legs[lj].var, legs[li].var - di + m * p);
                }
            }
        } else {
            let assign: Vec<Vec<Variable>> = dwelling
                .iter()
                .map(|_| (0..capacity).map(|_| model.add_binary()).collect())
                .collect();
            for row in &assign {
                let sum = row.iter().fold(good_lp::Expression::from(0.0), |acc, &v| acc + v);
                model.add_eq(sum, 1.0);
            }
            for a in 0..dwelling.len() {
                for b in (a + 1)..dwelling.len() {
                    let (li, di) = dwelling[a];
                    let (lj, dj) = dwelling[b];
                    for p in 0..capacity as usize {
                        let z = model.add_binary();
                        let gate = m * (2.0 - assign[a][p] - assign[b][p]);
                        model.add_le(legs[li].var, legs[lj].var - dj + m * (1.0 - z) + gate.clone());
                        model.add_le(legs[lj].var, legs[li].var - di + m * z + gate);
                    }
                }
            }
        }
    }

    // Constraint 5 + 6: cross-section conflicts, direct declarations and
    // conflict groups (resolved to a max clearance per unordered section
    // pair before emitting constraints).
    let mut pair_clearance: IndexMap<(String, String), u64> = IndexMap::new();
    for section in network.sections() {
        for (other_id, clearance) in &section.conflicts_with {
            let key = ordered_pair(&section.id, other_id);
            pair_clearance
                .entry(key)
                .and_modify(|c| *c = (*c).max(*clearance))
                .or_insert(*clearance);
        }
    }
    let mut group_members: IndexMap<&str, Vec<(&str, u64)>> = IndexMap::new();
    for section in network.sections() {
        for (group, clearance) in &section.conflict_groups {
            group_members
                .entry(group.as_str())
                .or_default()
                .push((section.id.as_str(), *clearance));
        }
    }
    for members in group_members.values() {
        for a in 0..members.len() {
            for b in (a + 1)..members.len() {
                let (s1, c1) = members[a];
                let (s2, c2) = members[b];
                if s1 == s2 {
                    continue;
                }
                let key = ordered_pair(s1, s2);
                let clearance = c1.max(c2);
                pair_clearance
                    .entry(key)
                    .and_modify(|c| *c = (*c).max(clearance))
                    .or_insert(clearance);
            }
        }
    }

    for ((s1, s2), clearance) in &pair_clearance {
        let empty = Vec::new();
        let legs_s1 = by_section.get(s1).unwrap_or(&empty);
        let legs_s2 = by_section.get(s2).unwrap_or(&empty);
        for &li in legs_s1 {
            for &lj in legs_s2 {
                let y = model.add_binary();
                let c = *clearance as f64;
                // s[lj] >= s[li] + C - M(1-y)
                model.add_le(legs[li].var + c - m + m * y, legs[lj].var);
                // s[li] >= s[lj] + C - M*y
                model.add_le(legs[lj].var + c - m * y, legs[li].var);
            }
        }
    }

    // Objective.
    let last_leg_of = |train_idx: usize| {
        legs.iter()
            .filter(|l| l.train_idx == train_idx)
            .max_by_key(|l| l.leg_idx)
            .expect("every train has at least one leg")
            .var
    };
    let has_due_times = trains.iter().any(|t| t.due_time.is_some());
    let objective = if has_due_times {
        let mut objective = good_lp::Expression::from(0.0);
        for (train_idx, train) in trains.iter().enumerate() {
            let last = last_leg_of(train_idx);
            if let Some(due) = train.due_time {
                let lateness = model.add_var(0.0);
                model.add_le(last - due as f64, lateness);
                objective = objective + lateness * f64::from(train.priority);
                if due > 0 {
                    objective = objective + last * (1e-3 / due as f64);
                }
            }
        }
        objective
    } else {
        let mut objective = good_lp::Expression::from(0.0);
        for (train_idx, train) in trains.iter().enumerate() {
            objective = objective + last_leg_of(train_idx) * f64::from(train.priority);
        }
        objective
    };

    let solved = model.solve(objective, time_limit)?;

    let mut schedule: Schedule = Vec::with_capacity(legs.len());
    for leg in &legs {
        let section = network.lookup(&leg.section_id)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let entry = solved.value(leg.var).floor() as u64;
        schedule.push(PlacedItem {
            train_id: trains[leg.train_idx].id.clone(),
            section_id: leg.section_id.clone(),
            entry,
            exit: entry + section.traverse_seconds,
        });
    }
    schedule.sort_by(|a, b| a.section_id.cmp(&b.section_id).then(a.entry.cmp(&b.entry)));
    Ok(schedule)
}

fn ordered_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
