//! Password hashing.

use crate::{AuthResult, PASSWORD_HASH_COST};

/// Hashes a plaintext password with bcrypt at [`PASSWORD_HASH_COST`].
pub fn hash_password(password: &str) -> AuthResult<String> {
    hash_password_with_cost(password, PASSWORD_HASH_COST)
}

/// Hashes a plaintext password with an explicit bcrypt cost.
pub fn hash_password_with_cost(password: &str, cost: u32) -> AuthResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// A hash that cannot be parsed is an error, not a mismatch.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    Ok(bcrypt::verify(password, hash)?)
}
