//! ct_report: pure offline report model + renderers (JSON/HTML).
//!
//! Determinism rules:
//! - No I/O here. Callers pass an already-scored `Contest`.
//! - Section order: levels in `Level::ALL` order, schools in standings order,
//!   subjects in `Subject::ALL` order, contributors in selection order.
//! - Fixed field names and key order in the JSON output.

#![deny(unsafe_code)]

use std::fmt;

use ct_core::{Level, Subject};
use ct_pipeline::{Contest, PipelineError, School};

#[cfg(feature = "render_html")]
mod render_html;
#[cfg(feature = "render_json")]
mod render_json;

#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::render_json;

pub const REPORT_TITLE: &str = "Contest School Standings";

// ===== Errors =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A school had not been scored when the model was built.
    Unscored(String),
    /// The contest and its standings disagree.
    Inconsistent(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Unscored(msg) => write!(f, "report needs a scored contest: {msg}"),
            ReportError::Inconsistent(what) => write!(f, "inconsistent contest state: {what}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<PipelineError> for ReportError {
    fn from(e: PipelineError) -> Self {
        ReportError::Unscored(e.to_string())
    }
}

// ===== Model =====

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportModel {
    pub title: String,
    pub input_sha256: String,
    pub levels: Vec<LevelSection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSection {
    pub level: Level,
    pub rows: Vec<SchoolRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchoolRow {
    pub rank: usize,
    pub school: String,
    pub total: i64,
    pub subjects: Vec<SubjectRow>,
    /// Test tallies as ("N8", count), in test order.
    pub tests: Vec<(String, u32)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectRow {
    pub subject: Subject,
    pub sum: i64,
    pub contributors: Vec<ContributorRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributorRow {
    pub label: String,
    pub grade: u8,
    pub score: i32,
}

// ===== API =====

/// Build the report model from a scored contest.
pub fn build_model(contest: &Contest, input_sha256: &str) -> Result<ReportModel, ReportError> {
    let mut levels = Vec::new();
    for level in contest.levels() {
        let mut rows = Vec::new();
        for standing in contest.standings(level)? {
            let school = contest
                .school(&standing.name)
                .ok_or(ReportError::Inconsistent("standing names a missing school"))?;
            rows.push(school_row(standing.rank, school)?);
        }
        levels.push(LevelSection { level, rows });
    }
    Ok(ReportModel {
        title: REPORT_TITLE.to_string(),
        input_sha256: input_sha256.to_string(),
        levels,
    })
}

fn school_row(rank: usize, school: &School) -> Result<SchoolRow, ReportError> {
    let mut subjects = Vec::with_capacity(Subject::ALL.len());
    for subject in Subject::ALL {
        let result = school.subject_result(subject)?;
        let contributors = result
            .contributors
            .iter()
            .map(|c| ContributorRow {
                label: school.contributor_label(c),
                grade: c.grade(),
                score: c.score().value(),
            })
            .collect();
        subjects.push(SubjectRow { subject, sum: result.sum, contributors });
    }
    let tests = school.num_tests().iter().map(|(t, n)| (t.to_string(), *n)).collect();
    Ok(SchoolRow {
        rank,
        school: school.name().to_string(),
        total: school.total_score()?,
        subjects,
        tests,
    })
}
