//! Database schema and migrations for credo.
//!
//! Migrations are applied sequentially when the database is opened; the
//! `schema_version` table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    r#"
-- Registered principals. The password column holds a bcrypt hash,
-- never plaintext. Email matching is case-sensitive exact match.
CREATE TABLE users (
    id          TEXT PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    password    TEXT NOT NULL,
    role        TEXT NOT NULL DEFAULT 'USER',    -- 'USER' or 'ADMIN'
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX idx_users_role ON users(role);
"#,
    // v2: password reset tokens
    r#"
-- Single-use password reset tokens. At most one live row per user:
-- issuing a new token deletes the previous ones in the same transaction.
CREATE TABLE password_reset_tokens (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token       TEXT NOT NULL UNIQUE,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_password_reset_tokens_user_id ON password_reset_tokens(user_id);
"#,
];
