//! Password-reset token generation.

use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};

use crate::duration::parse_duration;

/// Fallback reset-token lifetime in seconds.
pub const DEFAULT_RESET_EXPIRES_SECS: u64 = 3600;

/// Raw entropy per token in bytes (256 bits).
const TOKEN_BYTES: usize = 32;

/// A freshly generated reset token, not yet persisted.
#[derive(Debug, Clone)]
pub struct GeneratedResetToken {
    /// Opaque token value: 64 hex characters.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// Generator for single-use password-reset tokens.
///
/// A pure function of the clock and the OS random source; persistence and
/// the single-active-token invariant are the orchestrator's job.
#[derive(Debug, Clone)]
pub struct ResetTokenGenerator {
    expires_in: u64,
}

impl ResetTokenGenerator {
    /// Create a generator with the given lifetime window (duration string,
    /// e.g. "1h").
    pub fn new(expires_window: &str) -> Self {
        Self {
            expires_in: parse_duration(expires_window, DEFAULT_RESET_EXPIRES_SECS),
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    /// Generate a new token expiring `expires_in` seconds from now.
    pub fn generate(&self) -> GeneratedResetToken {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        GeneratedResetToken {
            token: hex::encode(bytes),
            expires_at: Utc::now() + Duration::seconds(self.expires_in as i64),
            expires_in: self.expires_in,
        }
    }
}
