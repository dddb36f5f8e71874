//! Capped top-N selection (deterministic; integers only; no RNG).
//!
//! Contract:
//! - Rank the pool by score, highest first. The sort is stable, so equal
//!   scores keep pool order; no further tie-break applies.
//! - Walk the ranking, accepting contributors until `team_size` are chosen.
//! - At most `top_grade_cap` accepted contributors may sit at `high_grade`.
//!   Once that cap is full, later top-grade entries are passed over while
//!   lower grades keep filling open slots.
//! - The sum is the exact integer sum of the accepted scores.

use alloc::vec::Vec;

use ct_core::{Grade, Params};

use crate::pool::Contributor;

/// Selected team for one subject.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    /// Accepted contributors in ranking order.
    pub contributors: Vec<Contributor>,
    /// Sum of the accepted scores.
    pub sum: i64,
}

impl Selection {
    #[inline]
    pub fn len(&self) -> usize { self.contributors.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.contributors.is_empty() }

    /// Number of accepted contributors at `grade`.
    pub fn count_at_grade(&self, grade: Grade) -> usize {
        self.contributors.iter().filter(|c| c.grade() == grade).count()
    }
}

/// Rank `pool` and select the team under the top-grade cap.
pub fn select_top(mut pool: Vec<Contributor>, high_grade: Grade, params: &Params) -> Selection {
    let team_size = usize::from(params.team_size);
    let cap = usize::from(params.top_grade_cap);

    // Stable: equal scores keep their pool order.
    pool.sort_by(|a, b| b.score().cmp(&a.score()));

    let mut contributors: Vec<Contributor> = Vec::with_capacity(team_size.min(pool.len()));
    let mut in_high_grade = 0usize;

    for c in pool {
        if contributors.len() >= team_size {
            break;
        }
        if c.grade() == high_grade {
            if in_high_grade < cap {
                in_high_grade += 1;
                contributors.push(c);
            }
        } else {
            contributors.push(c);
        }
    }

    let sum = contributors
        .iter()
        .map(|c| i64::from(c.score().value()))
        .sum();

    Selection { contributors, sum }
}
