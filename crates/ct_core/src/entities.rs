//! Enrolled students and the `Scored` capability.

use alloc::collections::BTreeMap;
use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domain::{Grade, Score, Subject};

/// Anything that sits at a grade and may hold a score for a subject.
pub trait Scored {
    fn grade(&self) -> Grade;
    fn score_for(&self, subject: Subject) -> Option<Score>;
}

/// A student enrolled at a school.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct Student {
    pub name: String,
    pub grade: Grade,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scores: BTreeMap<Subject, Score>,
}

impl Student {
    pub fn new(name: impl Into<String>, grade: Grade) -> Self {
        Self { name: name.into(), grade, scores: BTreeMap::new() }
    }

    /// Builder-style score setter.
    pub fn with_score(mut self, subject: Subject, score: impl Into<Score>) -> Self {
        self.set_score(subject, score.into());
        self
    }

    pub fn set_score(&mut self, subject: Subject, score: Score) {
        self.scores.insert(subject, score);
    }

    #[inline]
    pub fn has_score(&self, subject: Subject) -> bool {
        self.scores.contains_key(&subject)
    }

    #[inline]
    pub fn score(&self, subject: Subject) -> Option<Score> {
        self.scores.get(&subject).copied()
    }
}

impl Scored for Student {
    #[inline]
    fn grade(&self) -> Grade { self.grade }
    #[inline]
    fn score_for(&self, subject: Subject) -> Option<Score> { self.score(subject) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_scores() {
        let s = Student::new("Ada", 8).with_score(Subject::N, 120).with_score(Subject::M, -1);
        assert!(s.has_score(Subject::N));
        assert!(!s.has_score(Subject::C));
        assert_eq!(s.score(Subject::M), Some(Score::new(-1)));
        assert_eq!(Scored::grade(&s), 8);
        assert_eq!(s.score_for(Subject::S), None);
    }
}
