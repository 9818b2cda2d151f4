//! Request payloads.

use serde::Deserialize;

/// Registration request.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Token refresh request.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password reset request (step one: ask for a token).
#[derive(Debug, Clone, Deserialize)]
pub struct RequestPasswordResetRequest {
    /// Email address.
    pub email: String,
}

/// Password reset confirmation (step two: consume the token).
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    /// Reset token value.
    pub token: String,
    /// New plaintext password.
    pub new_password: String,
}
