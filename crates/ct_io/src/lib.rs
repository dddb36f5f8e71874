//! ct_io: the only library crate that touches the filesystem.
//!
//! - `loader`: contest roster / anonymous scores and optional params, from JSON.
//! - `canonical_json`: sorted-key compact JSON and atomic artifact writes.
//! - `hasher`: lowercase SHA-256 digests and the `RES:` artifact id.
//!
//! Shared error type (`IoError`) with `From` conversions used across modules.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub use loader::{load_contest, load_params, parse_contest_str, parse_params_str, LoadedContest};

/// Unified error for ct_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON syntax or shape errors, located by a JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Well-formed input that breaks a contest rule (duplicate school, bad params).
    #[error("invalid: {0}")]
    Invalid(String),

    /// Digest or id construction failed.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl IoError {
    pub(crate) fn json_at(pointer: impl Into<String>, msg: impl Into<String>) -> Self {
        IoError::Json { pointer: pointer.into(), msg: msg.into() }
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; report at the root.
        IoError::json_at("/", e.to_string())
    }
}

impl From<ct_pipeline::PipelineError> for IoError {
    fn from(e: ct_pipeline::PipelineError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

impl From<ct_core::variables::VarsError> for IoError {
    fn from(e: ct_core::variables::VarsError) -> Self {
        IoError::Invalid(format!("parameter domain error: {e}"))
    }
}
