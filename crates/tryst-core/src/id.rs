//! Session identifier generation.
//!
//! Identifiers are two independently drawn 4-byte tokens from the operating
//! system's secure random source, hex encoded and joined by a single space:
//! `"3f9a01bc 7e2d44aa"`. The space-separated shape keeps ids easy to read
//! aloud when one peer dictates an id to the other out of band.

use rand_core::{OsRng, RngCore};

/// Bytes of entropy per token (8 hex characters once encoded).
pub const TOKEN_BYTES: usize = 4;

/// Generate a fresh session identifier.
///
/// Uniqueness against ids already present in a registry is the caller's
/// responsibility; the registry regenerates on the rare collision.
pub fn generate_session_id() -> String {
    format!("{} {}", random_token(), random_token())
}

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
