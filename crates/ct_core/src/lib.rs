//! ct_core: Core contest types, scoring parameters, and exact rounding.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! engine (`ct_algo`, `ct_pipeline`, `ct_io`, `ct_report`, `ct_cli`).
//!
//! - Closed domains: `Subject` (N, C, M, S), `Level` (Middle, High)
//! - `Score` (ordered by value; negative means "no attempt")
//! - `Test` = subject + grade, wire shape `"N8"`
//! - `SchoolName` (identity key for schools)
//! - `Student` and the `Scored` capability
//! - Scoring `Params` (team size, top-grade cap)
//! - Integer-first ratio + half-away-from-zero rounding
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod domain;
pub mod entities;
pub mod ids;
pub mod variables;

pub use domain::{Grade, Level, Score, Subject, MAX_GRADE, MIN_GRADE};
pub use entities::{Scored, Student};
pub use ids::{SchoolName, Test};
pub use variables::Params;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidSubject,
        InvalidLevel,
        InvalidTest,
        GradeOutOfRange(u8),
        InvalidSchoolName,
        InvalidRatio,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidSubject => write!(f, "invalid subject"),
                CoreError::InvalidLevel => write!(f, "invalid level"),
                CoreError::InvalidTest => write!(f, "invalid test"),
                CoreError::GradeOutOfRange(g) => write!(f, "grade out of range: {g}"),
                CoreError::InvalidSchoolName => write!(f, "invalid school name"),
                CoreError::InvalidRatio => write!(f, "invalid ratio"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod rounding {
    //! Integer-first ratio type and rounding helpers.

    use crate::errors::CoreError;

    /// Exact ratio with normalized sign and positive denominator.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Ratio {
        pub num: i128,
        pub den: i128,
    }

    #[inline]
    fn abs_i128(x: i128) -> i128 { if x < 0 { -x } else { x } }

    fn gcd_i128(mut a: i128, mut b: i128) -> i128 {
        a = abs_i128(a);
        b = abs_i128(b);
        while b != 0 {
            let r = a % b;
            a = b;
            b = r;
        }
        if a == 0 { 1 } else { a }
    }

    /// Construct a ratio, ensuring `den > 0` and reducing by GCD.
    pub fn new_ratio_checked(num: i128, den: i128) -> Result<Ratio, CoreError> {
        if den == 0 { return Err(CoreError::InvalidRatio); }
        let (mut n, mut d) = (num, den);
        if d < 0 {
            n = -n;
            d = -d;
        }
        let g = gcd_i128(n, d);
        Ok(Ratio { num: n / g, den: d / g })
    }

    /// Round to the nearest integer; exact halves go away from zero.
    ///
    /// Expects a normalized ratio (`den > 0`), as produced by `new_ratio_checked`.
    pub fn round_half_away_from_zero(r: &Ratio) -> i128 {
        let q = r.num / r.den;
        let rem = abs_i128(r.num % r.den);
        if rem * 2 >= r.den {
            if r.num < 0 { q - 1 } else { q + 1 }
        } else {
            q
        }
    }

}
