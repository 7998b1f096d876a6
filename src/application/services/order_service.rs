//! Order management service.

use std::sync::Arc;

use serde_json::json;

use crate::application::batch::{BatchError, BatchOutcome, OrderDraft};
use crate::application::services::{Page, total_pages};
use crate::domain::entities::{NewOrder, Order, OrderStatus};
use crate::domain::repositories::{OrderRepository, UserRepository};
use crate::error::AppError;
use crate::utils::validation::parse_amount;

/// Service for creating and querying orders and updating their status.
///
/// Referential existence of the owning user is checked here before any
/// insert; the foreign key constraint is the backstop for races.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { orders, users }
    }

    /// Creates an order from a raw payload. Status starts as `pending`.
    ///
    /// Field validation runs before the user-existence check, so a payload
    /// that is both malformed and aimed at a missing user reports the field
    /// error (400), not the 404.
    pub async fn create(&self, draft: OrderDraft) -> Result<Order, AppError> {
        let user_id = draft
            .user_id
            .ok_or_else(|| AppError::bad_request("User ID is required", json!({})))?;

        let product_name = draft
            .product_name
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if product_name.is_empty() {
            return Err(AppError::bad_request("Product name is required", json!({})));
        }

        let amount_value = draft
            .amount
            .ok_or_else(|| AppError::bad_request("Amount is required", json!({})))?;
        let amount = parse_amount(&amount_value)
            .map_err(|e| AppError::bad_request(e.message(), json!({})))?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "user_id": user_id }),
            ));
        }

        self.orders
            .create(NewOrder {
                user_id,
                product_name,
                amount,
            })
            .await
    }

    /// Lists orders newest-first for one page, with an optional owner filter
    /// and a case-insensitive product name search.
    pub async fn list(
        &self,
        page: i64,
        per_page: i64,
        user_id: Option<i64>,
        search: Option<&str>,
    ) -> Result<Page<Order>, AppError> {
        let offset = (page - 1) * per_page;
        let items = self.orders.list(user_id, search, offset, per_page).await?;
        let total = self.orders.count(user_id, search).await?;

        Ok(Page {
            items,
            total,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Returns all orders newest-first, optionally filtered by owner.
    pub async fn export(&self, user_id: Option<i64>) -> Result<Vec<Order>, AppError> {
        self.orders.list_all(user_id).await
    }

    /// Validates a batch of order payloads and persists the valid ones with
    /// a single commit.
    ///
    /// Per-item validation order matches single create: field presence,
    /// amount parsing, then user existence. Error entries carry only the
    /// index and message.
    pub async fn batch_create(
        &self,
        drafts: Vec<OrderDraft>,
    ) -> Result<BatchOutcome<Order>, AppError> {
        let mut valid = Vec::new();
        let mut errors = Vec::new();

        for (index, draft) in drafts.into_iter().enumerate() {
            match self.validate_batch_item(draft).await? {
                Ok(new_order) => valid.push(new_order),
                Err(message) => errors.push(BatchError {
                    index,
                    data: None,
                    error: message,
                }),
            }
        }

        let created = if valid.is_empty() {
            Vec::new()
        } else {
            self.orders.create_batch(valid).await?
        };

        Ok(BatchOutcome { created, errors })
    }

    /// Replaces an order's status after validating membership in the valid
    /// set (case-insensitively).
    pub async fn update_status(&self, id: i64, status: Option<String>) -> Result<Order, AppError> {
        self.get(id).await?;

        let raw = status.ok_or_else(|| AppError::bad_request("Status is required", json!({})))?;
        let status = OrderStatus::parse(&raw).ok_or_else(|| {
            AppError::bad_request(
                format!("Invalid status. Must be one of: {}", OrderStatus::valid_set()),
                json!({ "status": raw }),
            )
        })?;

        self.orders.update_status(id, status).await
    }

    /// Fetches an order or fails with 404.
    pub async fn get(&self, id: i64) -> Result<Order, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found", json!({ "id": id })))
    }

    /// Validates one batch element. The outer `Result` is for repository
    /// failures (which abort the whole batch); the inner one carries the
    /// per-item rejection message.
    async fn validate_batch_item(
        &self,
        draft: OrderDraft,
    ) -> Result<Result<NewOrder, String>, AppError> {
        let Some(user_id) = draft.user_id else {
            return Ok(Err("user_id is required".to_string()));
        };

        let product_name = draft
            .product_name
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if product_name.is_empty() {
            return Ok(Err("product_name is required".to_string()));
        }

        let Some(amount_value) = draft.amount else {
            return Ok(Err("amount is required".to_string()));
        };
        let amount = match parse_amount(&amount_value) {
            Ok(amount) => amount,
            Err(e) => return Ok(Err(e.message().to_string())),
        };

        if self.users.find_by_id(user_id).await?.is_none() {
            return Ok(Err(format!("User with id {user_id} not found")));
        }

        Ok(Ok(NewOrder {
            user_id,
            product_name,
            amount,
        }))
    }
}
