//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// PostgreSQL repository for user storage and retrieval.
///
/// `order_count` is always derived inline (a correlated count against
/// `orders`), so every returned [`User`] is ready for serialization.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at, 0::BIGINT AS order_count
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn create_batch(&self, new_users: Vec<NewUser>) -> Result<Vec<User>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(new_users.len());

        for new_user in new_users {
            let user = sqlx::query_as::<_, User>(
                r#"
                INSERT INTO users (name, email)
                VALUES ($1, $2)
                RETURNING id, name, email, created_at, 0::BIGINT AS order_count
                "#,
            )
            .bind(&new_user.name)
            .bind(&new_user.email)
            .fetch_one(&mut *tx)
            .await?;

            created.push(user);
        }

        // Single commit point; any earlier `?` drops the transaction and
        // rolls the whole batch back.
        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.created_at,
                   (SELECT COUNT(*) FROM orders o WHERE o.user_id = u.id) AS order_count
            FROM users u
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.created_at,
                   (SELECT COUNT(*) FROM orders o WHERE o.user_id = u.id) AS order_count
            FROM users u
            WHERE lower(u.email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn all_emails(&self) -> Result<Vec<String>, AppError> {
        let emails = sqlx::query_scalar::<_, String>("SELECT email FROM users")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(emails)
    }

    async fn list<'a>(
        &self,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.created_at,
                   (SELECT COUNT(*) FROM orders o WHERE o.user_id = u.id) AS order_count
            FROM users u
            WHERE ($1::text IS NULL OR u.name ILIKE $1 OR u.email ILIKE $1)
            ORDER BY u.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(users)
    }

    async fn count<'a>(&self, search: Option<&'a str>) -> Result<i64, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users u
            WHERE ($1::text IS NULL OR u.name ILIKE $1 OR u.email ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.created_at,
                   (SELECT COUNT(*) FROM orders o WHERE o.user_id = u.id) AS order_count
            FROM users u
            ORDER BY u.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(users)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING id, name, email, created_at,
                      (SELECT COUNT(*) FROM orders o WHERE o.user_id = users.id) AS order_count
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        user.ok_or_else(|| {
            AppError::not_found("User not found", serde_json::json!({ "id": id }))
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
