// crates/ct_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// Core types used across the algorithm surface
pub use ct_core::{Grade, Level, Params, Score, Student, Subject, Test};

// ----------------------------- Algorithms (public surface) ---------------------------

/// Candidate pools: enrolled students plus anonymous score entries.
pub mod pool;
/// Capped top-N selection and its exact sum.
pub mod select;
/// Level-weighted combination of the four subject sums.
pub mod weighting;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use pool::{build_pool, AnonLookup, Contributor};
pub use select::{select_top, Selection};
pub use weighting::{weighted_total, SubjectSums, WeightError};
