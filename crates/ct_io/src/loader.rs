//! Loader: read the local contest file (and an optional params file), check it,
//! and hand back a `Contest` ready for scoring. No network I/O.
//!
//! Ingestion order per school: roster first, then each anonymous list through
//! the bulk-attach path, then a single `calculate_test_nums` pass over the roster.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use ct_core::{Level, Params, SchoolName, Score, Student, Test, MAX_GRADE, MIN_GRADE};
use ct_pipeline::{Contest, School};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{hasher, IoError, IoResult};

/// Refuse to read input files beyond this size.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// A parsed contest together with the digest of its canonical input form.
#[derive(Debug)]
pub struct LoadedContest {
    pub contest: Contest,
    /// SHA-256 (lowercase hex) of the input's canonical JSON bytes.
    pub input_sha256: String,
}

// ----------------------------- Wire types -----------------------------

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawContest {
    schools: Vec<RawSchool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchool {
    name: SchoolName,
    level: Level,
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    anonymous_scores: BTreeMap<Test, Vec<Score>>,
}

// ----------------------------- Public surface -----------------------------

/// Read, digest and build the contest at `path`.
pub fn load_contest(path: &Path) -> IoResult<LoadedContest> {
    let text = read_text_with_limit(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let input_sha256 = hasher::sha256_canonical(&value)?;
    let contest = contest_from_value(value)?;
    debug!(path = %path.display(), schools = contest.len(), sha256 = %input_sha256, "contest loaded");
    Ok(LoadedContest { contest, input_sha256 })
}

/// Build a contest from JSON text.
pub fn parse_contest_str(text: &str) -> IoResult<Contest> {
    contest_from_value(serde_json::from_str(text)?)
}

/// Read and validate a params file.
pub fn load_params(path: &Path) -> IoResult<Params> {
    parse_params_str(&read_text_with_limit(path)?)
}

/// Parse params JSON; absent fields keep the contest defaults.
pub fn parse_params_str(text: &str) -> IoResult<Params> {
    let params: Params = serde_json::from_str(text)?;
    params.validate_domains()?;
    Ok(params)
}

// ----------------------------- Internals -----------------------------

fn read_text_with_limit(path: &Path) -> IoResult<String> {
    let meta = fs::metadata(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    if !meta.is_file() {
        return Err(IoError::Path(format!("{}: not a regular file", path.display())));
    }
    if meta.len() > MAX_INPUT_BYTES {
        return Err(IoError::Path(format!(
            "{}: {} bytes exceeds the {MAX_INPUT_BYTES} byte input limit",
            path.display(),
            meta.len()
        )));
    }
    fs::read_to_string(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))
}

fn contest_from_value(value: Value) -> IoResult<Contest> {
    let raw: RawContest = serde_json::from_value(value)?;

    let mut seen: BTreeSet<&SchoolName> = BTreeSet::new();
    for (i, s) in raw.schools.iter().enumerate() {
        if !seen.insert(&s.name) {
            return Err(IoError::json_at(format!("/schools/{i}/name"), format!("duplicate school {}", s.name)));
        }
        check_roster(i, s)?;
    }

    let mut contest = Contest::new();
    for raw_school in raw.schools {
        contest.add_school(build_school(raw_school))?;
    }
    Ok(contest)
}

fn check_roster(i: usize, s: &RawSchool) -> IoResult<()> {
    for (j, st) in s.students.iter().enumerate() {
        if st.name.trim().is_empty() {
            return Err(IoError::json_at(format!("/schools/{i}/students/{j}/name"), "student name is empty"));
        }
        if !(MIN_GRADE..=MAX_GRADE).contains(&st.grade) {
            return Err(IoError::json_at(
                format!("/schools/{i}/students/{j}/grade"),
                format!("grade {} outside {MIN_GRADE}..={MAX_GRADE}", st.grade),
            ));
        }
    }
    for test in s.anonymous_scores.keys() {
        if !s.level.contains_grade(test.grade()) {
            warn!(
                school = %s.name,
                test = %test,
                level = %s.level,
                "anonymous list outside level range is tallied but never selected"
            );
        }
    }
    Ok(())
}

fn build_school(raw: RawSchool) -> School {
    let mut school = School::new(raw.name, raw.level);
    for st in raw.students {
        school.add_student(st);
    }
    for (test, scores) in raw.anonymous_scores {
        school.add_anon_scores(test, scores);
    }
    school.calculate_test_nums();
    school
}
