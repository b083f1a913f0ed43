//! Error taxonomy for the scheduling core.

/// Failure kinds the scheduling core can raise.
///
/// `SolverFailed` and `NotImplemented` are recovered by [`crate::dispatch`]
/// (falls back to the greedy scheduler); only `UnknownSection` and
/// `InvalidInput` ever escape the public `schedule` entry point.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("unknown section `{0}`")]
    UnknownSection(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("solver failed: {0}")]
    SolverFailed(String),

    #[error("unsupported MIP formulation: {0}")]
    NotImplemented(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
