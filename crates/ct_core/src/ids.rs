//! crates/ct_core/src/ids.rs
//! Identity keys: `SchoolName` (school identity) and `Test` (subject + grade).
//! Deterministic, strict shapes; no I/O.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{Grade, Subject, MAX_GRADE, MIN_GRADE};
use crate::errors::CoreError;

const SCHOOL_NAME_MAX_LEN: usize = 128;

/* -------------------------------------------------------------------------- */
/*                                 SchoolName                                 */
/* -------------------------------------------------------------------------- */

/// School name. Two schools are the same school iff their names match exactly.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SchoolName(String);

impl SchoolName {
    pub fn as_str(&self) -> &str { &self.0 }
}

#[inline]
fn is_valid_school_name(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= SCHOOL_NAME_MAX_LEN
        && s.trim() == s
        && !s.chars().any(|c| c.is_control())
}

impl fmt::Display for SchoolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SchoolName {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_school_name(s) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidSchoolName) }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SchoolName {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Test                                    */
/* -------------------------------------------------------------------------- */

/// One administered test: a subject at a grade. Wire shape is `"<subject><grade>"`,
/// e.g. `"N8"` or `"S12"`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Test {
    subject: Subject,
    grade: Grade,
}

impl Test {
    pub fn new(subject: Subject, grade: Grade) -> Result<Self, CoreError> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(CoreError::GradeOutOfRange(grade));
        }
        Ok(Self { subject, grade })
    }

    #[inline]
    pub fn subject(&self) -> Subject { self.subject }

    #[inline]
    pub fn grade(&self) -> Grade { self.grade }
}

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.subject, self.grade)
    }
}

impl FromStr for Test {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || s.len() < 2 {
            return Err(CoreError::InvalidTest);
        }
        let (subj, grade) = s.split_at(1);
        let subject: Subject = subj.parse().map_err(|_| CoreError::InvalidTest)?;
        // No leading zero, so "N08" never aliases "N8".
        if !grade.bytes().all(|b| b.is_ascii_digit()) || grade.len() > 2 || grade.starts_with('0') {
            return Err(CoreError::InvalidTest);
        }
        let grade: Grade = grade.parse().map_err(|_| CoreError::InvalidTest)?;
        Test::new(subject, grade)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Test {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Test {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
