//! Level-weighted school total (integers only; one rounding step).
//!
//! - Middle: `N + C + round(M·8/5 + S·8/5)`
//! - Other levels: `N + round(M·10/9 + S·10/9 + C·8/7)`
//!
//! The weighted part is evaluated as one exact ratio (`8/5`, and `70/63`,
//! `72/63` over a common denominator) and rounded half away from zero once.
//! All four subject sums must be present; nothing is defaulted.

use alloc::collections::BTreeMap;
use core::fmt;

use ct_core::rounding::{round_half_away_from_zero, Ratio};
use ct_core::{Level, Subject};

/// Aggregation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightError {
    /// A subject sum needed by the formula was never recorded.
    MissingSubject(Subject),
    /// The weighted value does not fit the output type.
    Overflow,
}

impl fmt::Display for WeightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightError::MissingSubject(s) => write!(f, "missing subject sum: {s}"),
            WeightError::Overflow => write!(f, "weighted total overflow"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WeightError {}

/// Per-subject sums feeding the weighted total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectSums(BTreeMap<Subject, i64>);

impl SubjectSums {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, subject: Subject, sum: i64) -> Option<i64> {
        self.0.insert(subject, sum)
    }

    #[inline]
    pub fn get(&self, subject: Subject) -> Option<i64> {
        self.0.get(&subject).copied()
    }

    /// Sum for `subject`, or `MissingSubject`.
    #[inline]
    pub fn require(&self, subject: Subject) -> Result<i64, WeightError> {
        self.get(subject).ok_or(WeightError::MissingSubject(subject))
    }
}

impl FromIterator<(Subject, i64)> for SubjectSums {
    fn from_iter<I: IntoIterator<Item = (Subject, i64)>>(it: I) -> Self {
        SubjectSums(it.into_iter().collect())
    }
}

/// Combine the four subject sums into the school total for `level`.
pub fn weighted_total(level: Level, sums: &SubjectSums) -> Result<i64, WeightError> {
    let n = i128::from(sums.require(Subject::N)?);
    let c = i128::from(sums.require(Subject::C)?);
    let m = i128::from(sums.require(Subject::M)?);
    let s = i128::from(sums.require(Subject::S)?);

    let total = if level.is_middle() {
        // (M + S)·8/5
        n + c + round_half_away_from_zero(&Ratio { num: (m + s) * 8, den: 5 })
    } else {
        // (M + S)·10/9 + C·8/7 = ((M + S)·70 + C·72) / 63
        n + round_half_away_from_zero(&Ratio { num: (m + s) * 70 + c * 72, den: 63 })
    };

    i64::try_from(total).map_err(|_| WeightError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums(n: i64, c: i64, m: i64, s: i64) -> SubjectSums {
        [(Subject::N, n), (Subject::C, c), (Subject::M, m), (Subject::S, s)]
            .into_iter()
            .collect()
    }

    #[test]
    fn middle_formula() {
        assert_eq!(weighted_total(Level::Middle, &sums(20, 15, 10, 10)), Ok(67));
    }

    #[test]
    fn high_formula() {
        assert_eq!(weighted_total(Level::High, &sums(20, 7, 9, 9)), Ok(48));
    }

    #[test]
    fn rounding_applies_once_to_combined_value() {
        // M·8/5 = 1.6 and S·8/5 = 1.6: rounding each gives 4, combined 3.2 gives 3.
        assert_eq!(weighted_total(Level::Middle, &sums(0, 0, 1, 1)), Ok(3));
        // M·10/9 = S·10/9 = 5.55..: rounding each gives 12, combined 11.11.. gives 11.
        assert_eq!(weighted_total(Level::High, &sums(0, 0, 5, 5)), Ok(11));
        // 1 + round(3·10/9 + 2·8/7) = 1 + round(5.61..) = 7
        assert_eq!(weighted_total(Level::High, &sums(1, 2, 3, 0)), Ok(7));
    }

    #[test]
    fn n_and_c_are_unweighted_for_middle() {
        assert_eq!(weighted_total(Level::Middle, &sums(100, 50, 0, 0)), Ok(150));
    }

    #[test]
    fn missing_subject_fails_fast() {
        let mut partial = sums(1, 2, 3, 4);
        partial.0.remove(&Subject::S);
        assert_eq!(
            weighted_total(Level::Middle, &partial),
            Err(WeightError::MissingSubject(Subject::S))
        );
        assert_eq!(
            weighted_total(Level::High, &SubjectSums::new()),
            Err(WeightError::MissingSubject(Subject::N))
        );
    }

    #[test]
    fn total_beyond_i64_is_overflow() {
        let big = i64::MAX;
        assert_eq!(weighted_total(Level::Middle, &sums(0, 0, big, big)), Err(WeightError::Overflow));
        assert_eq!(weighted_total(Level::High, &sums(big, 0, 0, 1)), Err(WeightError::Overflow));
        assert_eq!(weighted_total(Level::High, &sums(big, 0, 0, 0)), Ok(big));
    }

    #[test]
    fn zero_sums_total_zero() {
        assert_eq!(weighted_total(Level::Middle, &sums(0, 0, 0, 0)), Ok(0));
        assert_eq!(weighted_total(Level::High, &sums(0, 0, 0, 0)), Ok(0));
    }
}
