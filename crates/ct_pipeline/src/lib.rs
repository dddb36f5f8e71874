//! ct_pipeline: deterministic scoring surface (roster → pools → select → aggregate → standings)
//! This crate stays I/O-free and delegates the arithmetic to `ct_algo`.
//!
//! A `School` owns its roster, anonymous score lists, test tallies, and the
//! cached per-subject results. Results are recomputed only by explicit calls;
//! reading a result that was never computed is an error, never a zero.

use ct_core::Subject;

pub mod contest;
pub mod school;

pub use contest::{Contest, Standing};
pub use school::{School, SubjectResult};

/// Single error surface for the scoring orchestration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Subject results were read before that subject was scored.
    #[error("subject {0} has not been scored")]
    NotScored(Subject),
    /// Total was read before aggregation ran.
    #[error("total score has not been aggregated")]
    NotAggregated,
    /// Aggregation ran before every subject was scored.
    #[error("cannot aggregate: missing subject sum {0}")]
    MissingSubject(Subject),
    /// Weighted total exceeded the output range.
    #[error("weighted total overflow")]
    Overflow,
    /// Two schools share one name.
    #[error("duplicate school: {0}")]
    DuplicateSchool(String),
    /// Scoring parameters failed validation.
    #[error("invalid params: {0}")]
    Params(String),
}

impl From<ct_algo::WeightError> for PipelineError {
    fn from(e: ct_algo::WeightError) -> Self {
        match e {
            ct_algo::WeightError::MissingSubject(s) => PipelineError::MissingSubject(s),
            ct_algo::WeightError::Overflow => PipelineError::Overflow,
        }
    }
}

impl From<ct_core::variables::VarsError> for PipelineError {
    fn from(e: ct_core::variables::VarsError) -> Self {
        PipelineError::Params(e.to_string())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
