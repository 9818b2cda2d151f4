//! Access and refresh token issuance and verification.
//!
//! Two independent signing secrets: a leaked access secret cannot forge
//! refresh tokens and vice versa. The access window is short to bound the
//! blast radius of a stolen bearer token; the refresh window is long and
//! the token is only ever presented to the refresh operation.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::db::{Role, User};
use crate::duration::parse_duration;
use crate::{CredoError, Result};

/// Fallback access-token lifetime in seconds when the configured window
/// does not parse.
pub const DEFAULT_ACCESS_EXPIRES_SECS: u64 = 900;

/// Fallback refresh-token lifetime in seconds.
pub const DEFAULT_REFRESH_EXPIRES_SECS: u64 = 604_800;

const INVALID_REFRESH_TOKEN: &str = "invalid or expired refresh token";

/// Claims embedded in issued tokens. Derived fresh from the live user
/// record on every issuance, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    /// Subject: the user's ID.
    pub sub: String,
    /// Email at issuance time.
    pub email: String,
    /// Role at issuance time.
    pub role: Role,
}

impl From<&User> for TokenPayload {
    fn from(user: &User) -> Self {
        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Wire-format JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: Role,
    iat: u64,
    exp: u64,
}

/// A freshly minted access/refresh token pair.
///
/// `expires_in` is the access token's validity window in seconds; the
/// refresh token has its own, longer window.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived token accepted only by the refresh operation.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Token issuer and verifier.
///
/// Duration windows are parsed once at construction; the per-request path
/// is pure computation with no shared state, safe to call concurrently.
pub struct TokenService {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
    access_expires_in: u64,
    refresh_expires_in: u64,
}

impl TokenService {
    /// Create a token service from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        // Zero leeway: an expired refresh token is rejected at second
        // granularity rather than inside a grace window.
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
            access_expires_in: parse_duration(
                &config.access_token_expires,
                DEFAULT_ACCESS_EXPIRES_SECS,
            ),
            refresh_expires_in: parse_duration(
                &config.refresh_token_expires,
                DEFAULT_REFRESH_EXPIRES_SECS,
            ),
        }
    }

    /// Access token lifetime in seconds.
    pub fn access_expires_in(&self) -> u64 {
        self.access_expires_in
    }

    /// Mint an access/refresh token pair for the given payload.
    pub fn generate_tokens(&self, payload: &TokenPayload) -> Result<IssuedTokens> {
        let now = Utc::now().timestamp() as u64;

        let access_claims = Claims {
            sub: payload.sub.clone(),
            email: payload.email.clone(),
            role: payload.role,
            iat: now,
            exp: now + self.access_expires_in,
        };
        let refresh_claims = Claims {
            exp: now + self.refresh_expires_in,
            ..access_claims.clone()
        };

        let access_token = encode(&Header::default(), &access_claims, &self.access_key)
            .map_err(|e| {
                tracing::error!("failed to sign access token: {e}");
                CredoError::TokenSigning(e.to_string())
            })?;
        let refresh_token = encode(&Header::default(), &refresh_claims, &self.refresh_key)
            .map_err(|e| {
                tracing::error!("failed to sign refresh token: {e}");
                CredoError::TokenSigning(e.to_string())
            })?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            expires_in: self.access_expires_in,
        })
    }

    /// Verify a refresh token and extract its payload.
    ///
    /// Every failure mode (bad signature, malformed token, expiry) maps to
    /// the same generic `Unauthorized` so a caller cannot tell a forged
    /// token from an expired one.
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenPayload> {
        let data = decode::<Claims>(token, &self.refresh_decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!("refresh token rejected: {e}");
                CredoError::Unauthorized(INVALID_REFRESH_TOKEN.to_string())
            })?;

        Ok(TokenPayload {
            sub: data.claims.sub,
            email: data.claims.email,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn payload() -> TokenPayload {
        TokenPayload {
            sub: "u1".to_string(),
            email: "a@b.com".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_refresh_round_trip() {
        let service = TokenService::new(&test_config());
        let tokens = service.generate_tokens(&payload()).unwrap();

        let verified = service.verify_refresh_token(&tokens.refresh_token).unwrap();
        assert_eq!(verified, payload());
    }

    #[test]
    fn test_expires_in_reflects_access_window() {
        let service = TokenService::new(&test_config());
        let tokens = service.generate_tokens(&payload()).unwrap();
        assert_eq!(tokens.expires_in, 900);
        assert_eq!(service.access_expires_in(), 900);
    }

    #[test]
    fn test_unparsable_windows_fall_back() {
        let config = AuthConfig {
            access_token_expires: "soon".to_string(),
            refresh_token_expires: "later".to_string(),
            ..test_config()
        };
        let service = TokenService::new(&config);
        assert_eq!(service.access_expires_in(), DEFAULT_ACCESS_EXPIRES_SECS);
        assert_eq!(service.refresh_expires_in, DEFAULT_REFRESH_EXPIRES_SECS);
    }

    #[test]
    fn test_access_token_rejected_as_refresh_token() {
        let service = TokenService::new(&test_config());
        let tokens = service.generate_tokens(&payload()).unwrap();

        let result = service.verify_refresh_token(&tokens.access_token);
        assert!(matches!(result, Err(CredoError::Unauthorized(_))));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = TokenService::new(&test_config());
        let tokens = service.generate_tokens(&payload()).unwrap();

        // Flip one character in the middle of the token.
        let mut chars: Vec<char> = tokens.refresh_token.chars().collect();
        let mid = chars.len() / 2;
        chars[mid] = if chars[mid] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();

        let result = service.verify_refresh_token(&tampered);
        assert!(matches!(result, Err(CredoError::Unauthorized(_))));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let service = TokenService::new(&test_config());

        let other = TokenService::new(&AuthConfig {
            refresh_token_secret: "some-other-secret".to_string(),
            ..test_config()
        });
        let tokens = other.generate_tokens(&payload()).unwrap();

        let result = service.verify_refresh_token(&tokens.refresh_token);
        assert!(matches!(result, Err(CredoError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_refresh_token_rejected() {
        let service = TokenService::new(&test_config());

        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: "u1".to_string(),
            email: "a@b.com".to_string(),
            role: Role::User,
            iat: now - 7200,
            exp: now - 3600,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"refresh-secret"),
        )
        .unwrap();

        let result = service.verify_refresh_token(&expired);
        assert!(matches!(result, Err(CredoError::Unauthorized(_))));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = TokenService::new(&test_config());
        let result = service.verify_refresh_token("not-a-jwt");
        assert!(matches!(result, Err(CredoError::Unauthorized(_))));
    }

    #[test]
    fn test_payload_from_user() {
        let user = User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            name: "A".to_string(),
            password: "hash".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let payload = TokenPayload::from(&user);
        assert_eq!(payload.sub, "u1");
        assert_eq!(payload.role, Role::Admin);
    }
}
