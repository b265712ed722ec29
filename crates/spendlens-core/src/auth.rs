//! Password hashing for the sign-in flow
//!
//! Hashes are PHC strings produced by Argon2id with a random per-password salt.

use std::sync::OnceLock;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::error::{Error, Result};

/// Hash a plaintext password for storage
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a candidate password against a stored hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

/// Burn one verification against a throwaway hash.
///
/// Lookups for unknown accounts call this so they take as long as a real
/// password check.
pub fn verify_dummy_password(candidate: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| match hash_password("spendlens-dummy-password") {
        Ok(hash) => Some(hash),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to prepare dummy password hash");
            None
        }
    });
    if let Some(hash) = dummy {
        let _ = verify_password(candidate, hash);
    }
}
