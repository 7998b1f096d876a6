//! Repository trait for order data access.

use crate::domain::entities::{NewOrder, Order, OrderStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing orders.
///
/// Listing operations return orders newest-first (`created_at` descending);
/// that ordering is part of the API contract, not an implementation detail.
/// The one exception is [`Self::list_for_user`], which returns a user's
/// orders in natural insertion order.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOrderRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Creates a single order with status `pending`.
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError>;

    /// Creates a batch of orders inside one transaction.
    ///
    /// Either every order in `new_orders` is persisted or none is.
    async fn create_batch(&self, new_orders: Vec<NewOrder>) -> Result<Vec<Order>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError>;

    /// Lists orders newest-first, optionally filtered by owner and by a
    /// case-insensitive substring match against the product name.
    async fn list<'a>(
        &self,
        user_id: Option<i64>,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError>;

    /// Counts orders matching the same filters as [`Self::list`].
    async fn count<'a>(&self, user_id: Option<i64>, search: Option<&'a str>) -> Result<i64, AppError>;

    /// Returns all orders newest-first, optionally filtered by owner.
    async fn list_all(&self, user_id: Option<i64>) -> Result<Vec<Order>, AppError>;

    /// Returns every order belonging to one user in insertion order.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Order>, AppError>;

    /// Counts orders owned by a user. Gate for user deletion.
    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError>;

    /// Replaces an order's status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no order matches `id`.
    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError>;
}
