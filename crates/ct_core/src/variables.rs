//! variables.rs: scoring parameters with contest defaults and domain checks.
//!
//! The contest rules fix a team of 4 contributors per subject, at most 3 of
//! them from the school's highest eligible grade. Both numbers live here so a
//! parameter file can restate them; omitting the file yields the defaults.

use alloc::string::String;
use alloc::format;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest team size a parameter file may request.
pub const MAX_TEAM_SIZE: u8 = 16;

/// Scoring parameters for the per-subject selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Params {
    /// Maximum contributors counted per subject.
    pub team_size: u8,
    /// Maximum contributors from the highest eligible grade.
    pub top_grade_cap: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self { team_size: 4, top_grade_cap: 3 }
    }
}

// -------- Validation (domain + cross-field consistency) --------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarsError {
    Domain(String),
    Consistency(String),
}

impl core::fmt::Display for VarsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VarsError::Domain(m) => write!(f, "domain: {m}"),
            VarsError::Consistency(m) => write!(f, "consistency: {m}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VarsError {}

pub type VarsResult<T> = Result<T, VarsError>;

impl Params {
    /// Validate numeric domains and cross-field consistency.
    pub fn validate_domains(&self) -> VarsResult<()> {
        if self.team_size == 0 || self.team_size > MAX_TEAM_SIZE {
            return Err(VarsError::Domain(format!(
                "team_size must be in 1..={MAX_TEAM_SIZE}, got {}",
                self.team_size
            )));
        }
        if self.top_grade_cap > self.team_size {
            return Err(VarsError::Consistency(format!(
                "top_grade_cap ({}) exceeds team_size ({})",
                self.top_grade_cap, self.team_size
            )));
        }
        Ok(())
    }
}
