/// Password hashing and verification using bcrypt
use crate::error::{AccountError, Result};

/// Hash a password with bcrypt.
/// Returns the hash string suitable for storage in the database.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|_| AccountError::Internal("Failed to hash password".to_string()))
}

/// Verify a password against a stored hash.
///
/// A malformed hash reports `false` rather than an error: the caller treats
/// it as an authentication failure, not a system fault.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
