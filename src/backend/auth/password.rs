/**
 * Password Hashing
 *
 * Thin wrappers over bcrypt. Every hash carries its own salt and cost, so
 * equal passwords produce different hashes and verification needs only the
 * stored string.
 */

use bcrypt::{hash, verify, BcryptError};

/// Hash a plaintext password with the given bcrypt cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch. A stored value that is not a bcrypt
/// hash is an error, not a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}
