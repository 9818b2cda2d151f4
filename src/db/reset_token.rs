//! Password reset token entity.

use chrono::{DateTime, Utc};

/// A persisted password-reset token.
///
/// Lifecycle: created on reset request, destroyed on successful consumption
/// or when superseded by a newer request. Never updated in place.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResetToken {
    /// Row ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: String,
    /// Opaque token value (64 hex characters).
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ResetToken {
    /// Check whether the token's expiry lies in the past.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
