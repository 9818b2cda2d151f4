//! Password hashing and verification.
//!
//! Uses bcrypt with a configurable cost factor. Hashing is CPU-bound, so
//! both operations run on the blocking thread pool and must not be called
//! from non-async contexts that cannot afford the latency.

use tokio::task;

use crate::{CredoError, Result};

/// One-way password hasher with a fixed cost factor.
///
/// The cost applies to new hashes only; verification reads the cost out of
/// the stored hash itself, so previously stored hashes remain valid after
/// the configured cost changes.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    ///
    /// Fails only when the hashing subsystem itself cannot complete.
    pub async fn hash(&self, plaintext: &str) -> Result<String> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;

        task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| CredoError::Hashing(e.to_string()))?
            .map_err(|e| CredoError::Hashing(e.to_string()))
    }

    /// Compare a plaintext password against a stored hash.
    ///
    /// Returns `false` on mismatch and for malformed hashes; errors only
    /// when the hashing subsystem itself cannot complete.
    pub async fn compare(&self, plaintext: &str, hash: &str) -> Result<bool> {
        let plaintext = plaintext.to_string();
        let hash = hash.to_string();

        let matched = task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(|e| CredoError::Hashing(e.to_string()))?;

        Ok(matched.unwrap_or(false))
    }
}
