//! bcrypt hashing on the blocking pool. Both calls are CPU-bound for tens of
//! milliseconds at the default cost and must not run on a runtime worker.

use crate::backend::error::BackendError;

/// Hash a password at the given cost
pub async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Check a password against a stored hash
pub async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}
