//! Response payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::IssuedTokens;
use crate::db::{Role, User};

/// Public view of a user record. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    /// User ID.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response to register and login: profile plus a fresh token pair.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Public profile of the authenticated user.
    pub user: UserProfile,
    /// Access token (JWT).
    pub access_token: String,
    /// Refresh token (JWT, distinct secret).
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

impl AuthResponse {
    /// Assemble from a profile and a minted token pair.
    pub fn new(user: UserProfile, tokens: IssuedTokens) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        }
    }
}

/// Response to a token refresh. Deliberately does not carry a new refresh
/// token; the presented one stays valid until its own expiry.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    /// Fresh access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Response to a password-reset request.
///
/// Identical for registered and unknown emails. `request_id` is an opaque
/// receipt for support correlation; it is not the reset token and is never
/// accepted by the confirm operation.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequested {
    /// Generic confirmation message.
    pub message: String,
    /// Opaque request receipt.
    pub request_id: String,
    /// Reset token lifetime in seconds.
    pub expires_in: u64,
}

/// Response to a completed password reset.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetCompleted {
    /// Confirmation message.
    pub message: String,
}
