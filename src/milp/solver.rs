//! Narrow MIP capability: `{add_var, add_le, add_eq, set_obj, solve}`.
//!
//! Nothing upstream of this module should need to know the backend is
//! CBC-class branch-and-bound — the formulations in [`super::common`] only
//! see variables, linear expressions, and a solve call.

use crate::error::{Result, ScheduleError};
use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{constraint, variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

pub struct Model {
    vars: ProblemVariables,
    constraints: Vec<good_lp::Constraint>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            vars: ProblemVariables::new(),
            constraints: Vec::new(),
        }
    }

    /// A continuous variable bounded below by `lower`.
    pub fn add_var(&mut self, lower: f64) -> Variable {
        self.vars.add(variable().min(lower))
    }

    /// A binary decision variable.
    pub fn add_binary(&mut self) -> Variable {
        self.vars.add(variable().binary())
    }

    pub fn add_le(&mut self, lhs: impl Into<Expression>, rhs: impl Into<Expression>) {
        self.constraints.push(constraint!(lhs.into() <= rhs.into()));
    }

    pub fn add_eq(&mut self, lhs: impl Into<Expression>, rhs: impl Into<Expression>) {
        self.constraints.push(constraint!(lhs.into() == rhs.into()));
    }

    /// Minimize `objective` subject to every constraint added so far, and
    /// hand back a value lookup closure over the winning solution.
    pub fn solve(self, objective: impl Into<Expression>, time_limit: Option<u64>) -> Result<Solved> {
        let mut problem = self.vars.minimise(objective.into()).using(coin_cbc);
        for c in self.constraints {
            problem = problem.with(c);
        }
        if let Some(limit) = time_limit {
            problem.set_parameter("seconds", &limit.to_string());
        }
        let solution = problem
            .solve()
            .map_err(|e| ScheduleError::SolverFailed(e.to_string()))?;
        Ok(Solved {
            values: Box::new(move |v: Variable| solution.value(v)),
        })
    }
}

pub struct Solved {
    values: Box<dyn Fn(Variable) -> f64>,
}

impl Solved {
    #[must_use]
    pub fn value(&self, v: Variable) -> f64 {
        (self.values)(v)
    }
}
