//! Store boundary for the credential lifecycle core.
//!
//! [`AuthStore`] is the capability set the orchestrator needs from
//! persistence; [`SqliteAuthStore`] is the provided implementation. The
//! two multi-step operations (`update_password`, `create_reset_token`)
//! run inside a single transaction so the one-live-reset-token invariant
//! holds under concurrent requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DbPool, NewUser, ResetToken, User};
use crate::{CredoError, Result};

/// Persistence operations required by the credential orchestrator.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Look up a user by email (case-sensitive exact match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up a user by ID.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Create a new user. The store assigns the ID and timestamps.
    async fn create(&self, new_user: &NewUser) -> Result<User>;

    /// Update a user's password hash, purging all of the user's reset
    /// tokens in the same transaction.
    async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()>;

    /// Look up a reset token by value, returning it with its owning user.
    /// Expired tokens are still returned; expiry is the caller's decision.
    async fn find_reset_token(&self, token: &str) -> Result<Option<(User, ResetToken)>>;

    /// Persist a new reset token, purging the user's prior tokens in the
    /// same transaction.
    async fn create_reset_token(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
}

/// SQLite-backed [`AuthStore`].
#[derive(Clone)]
pub struct SqliteAuthStore {
    pool: DbPool,
}

impl SqliteAuthStore {
    /// Create a new store over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, name, password, role, created_at, updated_at";

#[async_trait]
impl AuthStore for SqliteAuthStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new_user.email.clone(),
            name: new_user.name.clone(),
            password: new_user.password.clone(),
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO users (id, email, name, password, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.role)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CredoError::Conflict("email already in use".to_string())
            }
            _ => CredoError::from(e),
        })?;

        Ok(user)
    }

    async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("UPDATE users SET password = $1, updated_at = $2 WHERE id = $3")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CredoError::NotFound("user".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_reset_token(&self, token: &str) -> Result<Option<(User, ResetToken)>> {
        let reset_token = sqlx::query_as::<_, ResetToken>(
            "SELECT id, user_id, token, expires_at, created_at
             FROM password_reset_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(reset_token) = reset_token else {
            return Ok(None);
        };

        // The FK guarantees the owner exists while the token row does.
        let user = self.find_by_id(&reset_token.user_id).await?;
        Ok(user.map(|user| (user, reset_token)))
    }

    async fn create_reset_token(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO password_reset_tokens (user_id, token, expires_at, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, Role};
    use chrono::Duration;

    async fn setup_store() -> (Database, SqliteAuthStore) {
        let db = Database::open_in_memory().await.unwrap();
        let store = SqliteAuthStore::new(db.pool().clone());
        (db, store)
    }

    async fn create_user(store: &SqliteAuthStore, email: &str) -> User {
        store
            .create(&NewUser::new(email, "Test User", "hashed-password"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let (_db, store) = setup_store().await;
        let created = create_user(&store, "a@b.com").await;

        let found = store.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "a@b.com");
        assert_eq!(found.role, Role::User);
        assert_eq!(found.password, "hashed-password");

        assert!(store.find_by_email("missing@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let (_db, store) = setup_store().await;
        create_user(&store, "Case@b.com").await;

        assert!(store.find_by_email("case@b.com").await.unwrap().is_none());
        assert!(store.find_by_email("Case@b.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let (_db, store) = setup_store().await;
        let created = create_user(&store, "a@b.com").await;

        let found = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.email, created.email);

        assert!(store.find_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (_db, store) = setup_store().await;
        create_user(&store, "a@b.com").await;

        let result = store
            .create(&NewUser::new("a@b.com", "Other", "other-hash"))
            .await;
        assert!(matches!(result, Err(CredoError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_with_role() {
        let (_db, store) = setup_store().await;
        let admin = store
            .create(&NewUser::new("root@b.com", "Root", "hash").with_role(Role::Admin))
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        let found = store.find_by_id(&admin.id).await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_create_reset_token_and_find() {
        let (_db, store) = setup_store().await;
        let user = create_user(&store, "a@b.com").await;
        let expires_at = Utc::now() + Duration::hours(1);

        store
            .create_reset_token(&user.id, "token-1", expires_at)
            .await
            .unwrap();

        let (found_user, found_token) = store
            .find_reset_token("token-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found_user.id, user.id);
        assert_eq!(found_token.user_id, user.id);
        assert_eq!(found_token.token, "token-1");
        assert!(!found_token.is_expired());

        assert!(store.find_reset_token("no-such-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_reset_token_supersedes_previous() {
        let (db, store) = setup_store().await;
        let user = create_user(&store, "a@b.com").await;
        let expires_at = Utc::now() + Duration::hours(1);

        store
            .create_reset_token(&user.id, "token-1", expires_at)
            .await
            .unwrap();
        store
            .create_reset_token(&user.id, "token-2", expires_at)
            .await
            .unwrap();

        assert!(store.find_reset_token("token-1").await.unwrap().is_none());
        assert!(store.find_reset_token("token-2").await.unwrap().is_some());

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM password_reset_tokens WHERE user_id = $1")
                .bind(&user.id)
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_update_password_purges_reset_tokens() {
        let (db, store) = setup_store().await;
        let user = create_user(&store, "a@b.com").await;
        let expires_at = Utc::now() + Duration::hours(1);

        store
            .create_reset_token(&user.id, "token-1", expires_at)
            .await
            .unwrap();

        store.update_password(&user.id, "new-hash").await.unwrap();

        let updated = store.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(updated.password, "new-hash");
        assert!(updated.updated_at >= user.updated_at);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM password_reset_tokens")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_update_password_unknown_user() {
        let (_db, store) = setup_store().await;
        let result = store.update_password("no-such-id", "hash").await;
        assert!(matches!(result, Err(CredoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_expired_token_is_still_returned() {
        let (_db, store) = setup_store().await;
        let user = create_user(&store, "a@b.com").await;

        store
            .create_reset_token(&user.id, "old-token", Utc::now() - Duration::seconds(1))
            .await
            .unwrap();

        let (_, token) = store
            .find_reset_token("old-token")
            .await
            .unwrap()
            .unwrap();
        assert!(token.is_expired());
    }
}
