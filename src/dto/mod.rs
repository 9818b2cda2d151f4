//! Request and response payloads for the exposed operations.
//!
//! Plain data in, plain data out: the transport layer owns parsing,
//! validation, and status-code mapping.

mod request;
mod response;

pub use request::{
    LoginRequest, RefreshRequest, RegisterRequest, RequestPasswordResetRequest,
    ResetPasswordRequest,
};
pub use response::{
    AuthResponse, PasswordResetCompleted, PasswordResetRequested, RefreshResponse, UserProfile,
};
