//! Closed contest domains: subjects, levels, grades and score values.
//!
//! Wire tokens are explicit and stable: subjects are single letters
//! (`"N"`, `"C"`, `"M"`, `"S"`), levels are lowercase words.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// School grade (6..=12 across all levels).
pub type Grade = u8;

/// Lowest grade any level admits.
pub const MIN_GRADE: Grade = 6;
/// Highest grade any level admits.
pub const MAX_GRADE: Grade = 12;

/* -------------------------------------------------------------------------- */
/*                                   Subject                                  */
/* -------------------------------------------------------------------------- */

/// Contest subject. Iteration order is fixed by [`Subject::ALL`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Subject {
    /// Number Sense
    #[cfg_attr(feature = "serde", serde(rename = "N"))]
    N,
    /// Calculator
    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    C,
    /// Mathematics
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    M,
    /// Science
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    S,
}

impl Subject {
    pub const ALL: [Subject; 4] = [Subject::N, Subject::C, Subject::M, Subject::S];

    pub fn token(self) -> &'static str {
        match self {
            Subject::N => "N",
            Subject::C => "C",
            Subject::M => "M",
            Subject::S => "S",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Subject::N => "Number Sense",
            Subject::C => "Calculator",
            Subject::M => "Mathematics",
            Subject::S => "Science",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Subject {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Subject::N),
            "C" => Ok(Subject::C),
            "M" => Ok(Subject::M),
            "S" => Ok(Subject::S),
            _ => Err(CoreError::InvalidSubject),
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Level                                   */
/* -------------------------------------------------------------------------- */

/// Contest division. Defines the eligible grade range and which weighting
/// formula combines the subject sums.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    Middle,
    High,
}

impl Level {
    pub const ALL: [Level; 2] = [Level::Middle, Level::High];

    pub fn low_grade(self) -> Grade {
        match self {
            Level::Middle => 6,
            Level::High => 9,
        }
    }

    pub fn high_grade(self) -> Grade {
        match self {
            Level::Middle => 8,
            Level::High => 12,
        }
    }

    #[inline]
    pub fn contains_grade(self, grade: Grade) -> bool {
        (self.low_grade()..=self.high_grade()).contains(&grade)
    }

    #[inline]
    pub fn is_middle(self) -> bool {
        matches!(self, Level::Middle)
    }

    pub fn token(self) -> &'static str {
        match self {
            Level::Middle => "middle",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Level {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "middle" => Ok(Level::Middle),
            "high" => Ok(Level::High),
            _ => Err(CoreError::InvalidLevel),
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Score                                   */
/* -------------------------------------------------------------------------- */

/// A single test score. Negative values mean the test was not taken or is
/// invalid; zero is a real (if unlucky) attempt.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Score(i32);

impl Score {
    #[inline]
    pub const fn new(value: i32) -> Self { Score(value) }

    #[inline]
    pub const fn value(self) -> i32 { self.0 }

    /// Score of a real attempt (`>= 0`).
    #[inline]
    pub const fn is_attempt(self) -> bool { self.0 >= 0 }

    /// Strictly positive score.
    #[inline]
    pub const fn is_positive(self) -> bool { self.0 > 0 }
}

impl From<i32> for Score {
    fn from(v: i32) -> Self { Score(v) }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
