//! Credential orchestrator.
//!
//! Coordinates the password hasher, the token service, the reset-token
//! generator, and the external user store across the five exposed flows.
//! Owns the error taxonomy: store and crypto detail never leaks outward.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::password::PasswordHasher;
use super::reset::ResetTokenGenerator;
use super::token::{TokenPayload, TokenService};
use crate::config::AuthConfig;
use crate::db::{AuthStore, NewUser};
use crate::dto::{
    AuthResponse, LoginRequest, PasswordResetCompleted, PasswordResetRequested, RefreshRequest,
    RefreshResponse, RegisterRequest, RequestPasswordResetRequest, ResetPasswordRequest,
    UserProfile,
};
use crate::{CredoError, Result};

// Both login failure paths (unknown email, wrong password) must produce
// this exact message so callers cannot probe for registered accounts.
const INVALID_CREDENTIALS: &str = "invalid credentials";

const INVALID_REFRESH: &str = "invalid or expired refresh token";

const RESET_REQUESTED: &str =
    "If the email is registered, password reset instructions will be sent";

/// Credential and token lifecycle orchestrator.
///
/// Stateless between calls; all consistency lives at the store boundary.
/// Constructed once at startup with the store capability set and the auth
/// configuration.
pub struct AuthService {
    store: Arc<dyn AuthStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
    reset_tokens: ResetTokenGenerator,
}

impl AuthService {
    /// Create the orchestrator from a store and the auth configuration.
    pub fn new(store: Arc<dyn AuthStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(config.hash_cost),
            tokens: TokenService::new(config),
            reset_tokens: ResetTokenGenerator::new(&config.reset_token_expires),
        }
    }

    /// Register a new user and issue a first token pair.
    ///
    /// The role is always the default unprivileged one; privilege
    /// escalation is not reachable from this operation.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        if self.store.find_by_email(&request.email).await?.is_some() {
            return Err(CredoError::Conflict("email already in use".to_string()));
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let user = self
            .store
            .create(&NewUser::new(request.email, request.name, password_hash))
            .await?;
        info!(user_id = %user.id, "user registered");

        let tokens = self.tokens.generate_tokens(&TokenPayload::from(&user))?;
        Ok(AuthResponse::new(UserProfile::from(&user), tokens))
    }

    /// Authenticate with email and password, issuing a fresh token pair.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let Some(user) = self.store.find_by_email(&request.email).await? else {
            return Err(CredoError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self.hasher.compare(&request.password, &user.password).await? {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(CredoError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let tokens = self.tokens.generate_tokens(&TokenPayload::from(&user))?;
        Ok(AuthResponse::new(UserProfile::from(&user), tokens))
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// The new token is minted from the live user record, not from the
    /// presented token's claims, so role or email changes made since the
    /// token was issued take effect here. The presented refresh token is
    /// not rotated.
    pub async fn refresh(&self, request: RefreshRequest) -> Result<RefreshResponse> {
        let payload = self.tokens.verify_refresh_token(&request.refresh_token)?;

        let Some(user) = self.store.find_by_id(&payload.sub).await? else {
            debug!("refresh rejected: subject no longer exists");
            return Err(CredoError::Unauthorized(INVALID_REFRESH.to_string()));
        };

        let tokens = self.tokens.generate_tokens(&TokenPayload::from(&user))?;
        Ok(RefreshResponse {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
        })
    }

    /// Begin a password reset.
    ///
    /// The response is identical whether or not the email is registered:
    /// a token is generated on every call and persisted only when a user
    /// matches, so neither the body nor the latency reveals registration
    /// status. Issuing a token invalidates any earlier one for that user.
    pub async fn request_password_reset(
        &self,
        request: RequestPasswordResetRequest,
    ) -> Result<PasswordResetRequested> {
        let user = self.store.find_by_email(&request.email).await?;
        let generated = self.reset_tokens.generate();

        if let Some(user) = user {
            self.store
                .create_reset_token(&user.id, &generated.token, generated.expires_at)
                .await?;
            info!(user_id = %user.id, "password reset token issued");
        }

        Ok(PasswordResetRequested {
            message: RESET_REQUESTED.to_string(),
            request_id: Uuid::new_v4().to_string(),
            expires_in: generated.expires_in,
        })
    }

    /// Complete a password reset with a previously issued token.
    ///
    /// An unknown token is `NotFound`; a known-but-expired token is
    /// `BadRequest` — the requester already holds the token string, so
    /// confirming its existence leaks nothing across accounts. Success
    /// consumes the token and revokes every other outstanding token for
    /// the user atomically with the password update.
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<PasswordResetCompleted> {
        let Some((user, reset_token)) = self.store.find_reset_token(&request.token).await? else {
            return Err(CredoError::NotFound("reset token".to_string()));
        };

        if reset_token.is_expired() {
            debug!(user_id = %user.id, "reset rejected: token expired");
            return Err(CredoError::BadRequest("reset token expired".to_string()));
        }

        let password_hash = self.hasher.hash(&request.new_password).await?;
        self.store.update_password(&user.id, &password_hash).await?;
        info!(user_id = %user.id, "password reset completed");

        Ok(PasswordResetCompleted {
            message: "password updated".to_string(),
        })
    }
}
