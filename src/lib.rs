//! credo — credential and token lifecycle core for multi-tenant web
//! backends.
//!
//! Password hashing and verification, access/refresh token issuance and
//! verification, and the single-use password-reset token state machine.
//! Transport, request validation, and generic user CRUD live with the
//! host; this crate exposes five operations on [`AuthService`] and the
//! [`AuthStore`] persistence boundary.

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod duration;
pub mod error;
pub mod logging;

pub use auth::{
    authorize, AuthService, GeneratedResetToken, IssuedTokens, PasswordHasher,
    ResetTokenGenerator, TokenPayload, TokenService,
};
pub use config::{AuthConfig, Config, DatabaseConfig, LoggingConfig};
pub use db::{AuthStore, Database, DbPool, NewUser, ResetToken, Role, SqliteAuthStore, User};
pub use dto::{
    AuthResponse, LoginRequest, PasswordResetCompleted, PasswordResetRequested, RefreshRequest,
    RefreshResponse, RegisterRequest, RequestPasswordResetRequest, ResetPasswordRequest,
    UserProfile,
};
pub use error::{CredoError, Result};
