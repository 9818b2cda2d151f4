//! User model for credo.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role. A closed set; registration always produces [`Role::User`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular unprivileged user.
    #[default]
    User,
    /// Administrator.
    Admin,
}

impl Role {
    /// Convert role to its canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// User entity representing a registered principal.
///
/// Owned by the store; the lifecycle core mutates it only through
/// `create` and `update_password`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Opaque unique ID (UUIDv4, assigned by the store on create).
    pub id: String,
    /// Email address (unique).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Password hash (bcrypt). Never exposed in responses.
    pub password: String,
    /// Role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// New user for creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Password hash. The caller hashes before constructing this.
    pub password: String,
    /// Role, defaults to [`Role::User`].
    pub role: Role,
}

impl NewUser {
    /// Create a new user record with the default role.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password: password_hash.into(),
            role: Role::default(),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
