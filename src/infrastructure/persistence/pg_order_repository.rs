//! PostgreSQL implementation of the order repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewOrder, Order, OrderStatus};
use crate::domain::repositories::OrderRepository;
use crate::error::AppError;

/// PostgreSQL repository for order storage and retrieval.
///
/// Every query joins the owning user so `user_name` is populated without a
/// second round trip. Inserts and updates use a CTE for the same reason:
/// `RETURNING` alone cannot join.
pub struct PgOrderRepository {
    pool: Arc<PgPool>,
}

impl PgOrderRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            WITH inserted AS (
                INSERT INTO orders (user_id, product_name, amount)
                VALUES ($1, $2, $3)
                RETURNING id, user_id, product_name, amount, status, created_at
            )
            SELECT i.id, i.user_id, i.product_name, i.amount, i.status, i.created_at,
                   u.name AS user_name
            FROM inserted i
            LEFT JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(new_order.user_id)
        .bind(&new_order.product_name)
        .bind(new_order.amount)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(order)
    }

    async fn create_batch(&self, new_orders: Vec<NewOrder>) -> Result<Vec<Order>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(new_orders.len());

        for new_order in new_orders {
            let order = sqlx::query_as::<_, Order>(
                r#"
                WITH inserted AS (
                    INSERT INTO orders (user_id, product_name, amount)
                    VALUES ($1, $2, $3)
                    RETURNING id, user_id, product_name, amount, status, created_at
                )
                SELECT i.id, i.user_id, i.product_name, i.amount, i.status, i.created_at,
                       u.name AS user_name
                FROM inserted i
                LEFT JOIN users u ON u.id = i.user_id
                "#,
            )
            .bind(new_order.user_id)
            .bind(&new_order.product_name)
            .bind(new_order.amount)
            .fetch_one(&mut *tx)
            .await?;

            created.push(order);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.id, o.user_id, o.product_name, o.amount, o.status, o.created_at,
                   u.name AS user_name
            FROM orders o
            LEFT JOIN users u ON u.id = o.user_id
            WHERE o.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(order)
    }

    async fn list<'a>(
        &self,
        user_id: Option<i64>,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.id, o.user_id, o.product_name, o.amount, o.status, o.created_at,
                   u.name AS user_name
            FROM orders o
            LEFT JOIN users u ON u.id = o.user_id
            WHERE ($1::bigint IS NULL OR o.user_id = $1)
              AND ($2::text IS NULL OR o.product_name ILIKE $2)
            ORDER BY o.created_at DESC, o.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(orders)
    }

    async fn count<'a>(&self, user_id: Option<i64>, search: Option<&'a str>) -> Result<i64, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders o
            WHERE ($1::bigint IS NULL OR o.user_id = $1)
              AND ($2::text IS NULL OR o.product_name ILIKE $2)
            "#,
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn list_all(&self, user_id: Option<i64>) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.id, o.user_id, o.product_name, o.amount, o.status, o.created_at,
                   u.name AS user_name
            FROM orders o
            LEFT JOIN users u ON u.id = o.user_id
            WHERE ($1::bigint IS NULL OR o.user_id = $1)
            ORDER BY o.created_at DESC, o.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(orders)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.id, o.user_id, o.product_name, o.amount, o.status, o.created_at,
                   u.name AS user_name
            FROM orders o
            LEFT JOIN users u ON u.id = o.user_id
            WHERE o.user_id = $1
            ORDER BY o.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(orders)
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            WITH updated AS (
                UPDATE orders
                SET status = $2
                WHERE id = $1
                RETURNING id, user_id, product_name, amount, status, created_at
            )
            SELECT up.id, up.user_id, up.product_name, up.amount, up.status, up.created_at,
                   u.name AS user_name
            FROM updated up
            LEFT JOIN users u ON u.id = up.user_id
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool.as_ref())
        .await?;

        order.ok_or_else(|| {
            AppError::not_found("Order not found", serde_json::json!({ "id": id }))
        })
    }
}
