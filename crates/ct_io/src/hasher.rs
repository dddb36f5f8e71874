//! Deterministic digests and the result id.
//!
//! - `sha256_hex` hashes raw bytes.
//! - `sha256_canonical` hashes the canonical JSON form of a value, so key order
//!   and whitespace in the source never change a digest.
//! - `res_id_from_canonical` builds `RES:<64 lowercase hex>` for result artifacts.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

pub const RES_PREFIX: &str = "RES:";

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lowercase hex SHA-256 of the canonical JSON bytes of `value`.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> IoResult<String> {
    let bytes = to_canonical_bytes(value).map_err(|e| IoError::Hash(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}

/// `RES:` id over the canonical form of a result payload (which must not contain the id).
pub fn res_id_from_canonical<T: Serialize + ?Sized>(payload: &T) -> IoResult<String> {
    Ok(format!("{RES_PREFIX}{}", sha256_canonical(payload)?))
}

/// True for a well-formed lowercase 64-hex digest.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f'))
}
