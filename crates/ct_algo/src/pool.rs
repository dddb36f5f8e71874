//! Contributor pool for one subject (deterministic; integers only).
//!
//! Inputs:
//! - `subject`: the subject being scored
//! - `students`: the school's enrolled roster (indices are stable handles)
//! - `anon`: anonymous score lists keyed by `Test` (subject + grade)
//! - `level`: the school's level, which bounds the anonymous grades consulted
//!
//! Rules in this layer:
//! - An enrolled student joins if they hold a score for `subject` and it is `>= 0`.
//! - For each grade in `low_grade..=high_grade`, every anonymous entry with a
//!   score `> 0` joins as an `Anonymous` contributor at that grade.
//! - A missing anonymous list contributes nothing; it is not an error.
//!
//! Named and anonymous entries use different thresholds (`>= 0` vs `> 0`).

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use ct_core::{Grade, Level, Score, Scored, Student, Subject, Test};

/// One candidate for a subject's team total.
///
/// `Anonymous` entries exist only while a subject is being scored; they never
/// join a roster.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Contributor {
    /// Enrolled student, by index into the school's roster.
    Enrolled { student: usize, grade: Grade, score: Score },
    /// One entry of an anonymous score list.
    Anonymous { grade: Grade, score: Score },
}

impl Contributor {
    #[inline]
    pub fn grade(&self) -> Grade {
        match *self {
            Contributor::Enrolled { grade, .. } | Contributor::Anonymous { grade, .. } => grade,
        }
    }

    #[inline]
    pub fn score(&self) -> Score {
        match *self {
            Contributor::Enrolled { score, .. } | Contributor::Anonymous { score, .. } => score,
        }
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Contributor::Anonymous { .. })
    }

    /// Roster index for enrolled contributors.
    #[inline]
    pub fn student_index(&self) -> Option<usize> {
        match *self {
            Contributor::Enrolled { student, .. } => Some(student),
            Contributor::Anonymous { .. } => None,
        }
    }
}

/// Read access to anonymous score lists keyed by test.
pub trait AnonLookup {
    fn anon_scores(&self, test: &Test) -> Option<&[Score]>;
}

impl AnonLookup for BTreeMap<Test, Vec<Score>> {
    #[inline]
    fn anon_scores(&self, test: &Test) -> Option<&[Score]> {
        self.get(test).map(Vec::as_slice)
    }
}

/// Build the full candidate list for `subject`.
///
/// Order: roster order first, then anonymous entries by grade ascending and
/// list order within a grade. Callers rank the pool; the order here only
/// matters for stable tie handling.
pub fn build_pool<A: AnonLookup + ?Sized>(
    subject: Subject,
    students: &[Student],
    anon: &A,
    level: Level,
) -> Vec<Contributor> {
    let mut pool: Vec<Contributor> = students
        .iter()
        .enumerate()
        .filter_map(|(idx, st)| {
            st.score_for(subject)
                .filter(|s| s.is_attempt())
                .map(|score| Contributor::Enrolled { student: idx, grade: st.grade(), score })
        })
        .collect();

    for grade in level.low_grade()..=level.high_grade() {
        // Level grades always lie in the test grade range.
        let Ok(test) = Test::new(subject, grade) else { continue };
        let Some(scores) = anon.anon_scores(&test) else { continue };
        pool.extend(
            scores
                .iter()
                .filter(|s| s.is_positive())
                .map(|&score| Contributor::Anonymous { grade, score }),
        );
    }

    pool
}
