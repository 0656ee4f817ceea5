use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{NewUser, User};

/// Persistence of user accounts.
///
/// Lookups return `Ok(None)` when no row matches; only real data-access
/// failures are errors.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    /// Insert a user whose password is already hashed.
    ///
    /// A taken username surfaces as [`DatabaseError::UniqueViolation`].
    async fn save(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// Delete every note owned by `user_id`, then the user row itself.
    ///
    /// Returns `false` when the user row did not exist.
    async fn delete_cascade(&self, user_id: i64) -> Result<bool, DatabaseError>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, password_hash FROM users WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn save(&self, user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) \
             RETURNING user_id, username, password_hash",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn delete_cascade(&self, user_id: i64) -> Result<bool, DatabaseError> {
        // Notes first: a user row must never disappear while it still owns notes.
        let mut tx = self.pool.begin().await?;

        let notes = sqlx::query("DELETE FROM notes WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Deleted user {} and {} owned note(s)",
            user_id,
            notes.rows_affected()
        );
        Ok(users.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
