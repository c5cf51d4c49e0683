//! Password hashing with bcrypt
//!
//! bcrypt is deliberately slow, so both operations run on the blocking thread
//! pool and the async caller only awaits the result.

use bcrypt::{hash, verify};

use super::auth::AuthError;

/// bcrypt cost factor for new hashes
pub const BCRYPT_COST: u32 = 10;

/// Hash a password with a fresh random salt.
///
/// The result is a modular-crypt string (`$2b$10$<salt><digest>`) carrying
/// everything needed to verify it later.
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a password against a stored hash.
///
/// A malformed hash is a mismatch, not an error.
pub async fn verify_password(password: &str, password_hash: &str) -> bool {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();

    match tokio::task::spawn_blocking(move || verify(password, &password_hash)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "Stored password hash could not be parsed");
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "Password verification task failed");
            false
        }
    }
}
