//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use users_core::entities::{NewUser, User, UserChanges};
use users_core::error::DomainError;
use users_core::traits::{RepoResult, UserRepository};
use users_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, username, password, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, username, password, created_at, updated_at
            FROM users
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn email_taken(&self, email: &str, exclude: Option<UserId>) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(email)
        .bind(exclude.map(UserId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn username_taken(&self, username: &str, exclude: Option<UserId>) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE username = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(username)
        .bind(exclude.map(UserId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, new_user))]
    async fn insert(&self, new_user: &NewUser) -> RepoResult<User> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Friendly conflict ordering: email first, then username. Dropping
        // the transaction on the error path rolls everything back.
        let email_taken = sqlx::query_scalar::<_, bool>(
            r"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&new_user.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if email_taken {
            return Err(DomainError::EmailTaken);
        }

        let username_taken = sqlx::query_scalar::<_, bool>(
            r"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(&new_user.username)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if username_taken {
            return Err(DomainError::UsernameTaken);
        }

        // id and both timestamps are assigned by the store
        let row = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (email, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, username, password, created_at, updated_at
            ",
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(User::from(row))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: UserId, changes: &UserChanges) -> RepoResult<User> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let exists = sqlx::query_scalar::<_, bool>(
            r"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if !exists {
            return Err(user_not_found(id));
        }

        // Conflicts only count against *other* rows; writing back the same
        // value a user already has is allowed.
        if let Some(email) = &changes.email {
            let taken = sqlx::query_scalar::<_, bool>(
                r"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
            )
            .bind(email)
            .bind(id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
            if taken {
                return Err(DomainError::EmailTaken);
            }
        }

        if let Some(username) = &changes.username {
            let taken = sqlx::query_scalar::<_, bool>(
                r"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND id <> $2)",
            )
            .bind(username)
            .bind(id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
            if taken {
                return Err(DomainError::UsernameTaken);
            }
        }

        let row = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET email = COALESCE($2, email),
                username = COALESCE($3, username),
                password = COALESCE($4, password),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, username, password, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(changes.email.as_deref())
        .bind(changes.username.as_deref())
        .bind(changes.password.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(User::from(row))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
