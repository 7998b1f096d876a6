//! User management service.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;

use crate::application::batch::{BatchError, BatchOutcome, UserDraft};
use crate::application::services::{Page, total_pages};
use crate::domain::entities::{NewUser, Order, User, UserPatch};
use crate::domain::repositories::{OrderRepository, UserRepository};
use crate::error::AppError;
use crate::utils::validation::is_valid_email;

/// Service for creating, querying, updating, and deleting users.
///
/// All field validation lives here; handlers only translate HTTP shapes.
/// Emails are normalized (trimmed, lower-cased) before any check so that
/// uniqueness is case-insensitive end to end.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { users, orders }
    }

    /// Creates a user from a raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for missing/empty fields or a bad
    /// email format, and [`AppError::Conflict`] when the email is already
    /// taken. The repository's unique index backstops concurrent duplicates.
    pub async fn create(&self, draft: UserDraft) -> Result<User, AppError> {
        let (name, email) = validate_user_fields(&draft)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already exists",
                json!({ "email": email }),
            ));
        }

        self.users.create(NewUser { name, email }).await
    }

    /// Lists users for one page, with an optional case-insensitive substring
    /// search against name or email.
    pub async fn list(
        &self,
        page: i64,
        per_page: i64,
        search: Option<&str>,
    ) -> Result<Page<User>, AppError> {
        let offset = (page - 1) * per_page;
        let items = self.users.list(search, offset, per_page).await?;
        let total = self.users.count(search).await?;

        Ok(Page {
            items,
            total,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Fetches a user or fails with 404.
    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    /// Returns a user together with all of their orders in insertion order.
    pub async fn orders_for_user(&self, id: i64) -> Result<(User, Vec<Order>), AppError> {
        let user = self.get(id).await?;
        let orders = self.orders.list_for_user(id).await?;
        Ok((user, orders))
    }

    /// Returns every user, unpaginated, for export.
    pub async fn export(&self) -> Result<Vec<User>, AppError> {
        self.users.list_all().await
    }

    /// Validates a batch of user payloads and persists the valid ones with a
    /// single commit.
    ///
    /// Duplicate detection covers both stored emails and valid emails earlier
    /// in the same batch, so a batch can never commit two users with the same
    /// address. Invalid elements are reported per index with the submitted
    /// data echoed back; they never abort the rest of the batch.
    pub async fn batch_create(
        &self,
        drafts: Vec<UserDraft>,
    ) -> Result<BatchOutcome<User>, AppError> {
        let mut seen: HashSet<String> = self
            .users
            .all_emails()
            .await?
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect();

        let mut valid = Vec::new();
        let mut errors = Vec::new();

        for (index, draft) in drafts.into_iter().enumerate() {
            let data = serde_json::to_value(&draft).unwrap_or(serde_json::Value::Null);

            let (name, email) = match validate_user_fields(&draft) {
                Ok(fields) => fields,
                Err(e) => {
                    errors.push(BatchError {
                        index,
                        data: Some(data),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            if seen.contains(&email) {
                errors.push(BatchError {
                    index,
                    data: Some(data),
                    error: format!("Email {email} already exists"),
                });
                continue;
            }

            seen.insert(email.clone());
            valid.push(NewUser { name, email });
        }

        let created = if valid.is_empty() {
            Vec::new()
        } else {
            self.users.create_batch(valid).await?
        };

        Ok(BatchOutcome { created, errors })
    }

    /// Applies a partial update; each present field is validated on its own.
    ///
    /// Email uniqueness excludes the user being updated, so re-submitting an
    /// unchanged email is not a conflict.
    pub async fn update(&self, id: i64, draft: UserDraft) -> Result<User, AppError> {
        self.get(id).await?;

        let mut patch = UserPatch::default();

        if let Some(name) = draft.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::bad_request("Name cannot be empty", json!({})));
            }
            patch.name = Some(name);
        }

        if let Some(email) = draft.email {
            let email = email.trim().to_lowercase();
            if email.is_empty() {
                return Err(AppError::bad_request("Email cannot be empty", json!({})));
            }
            if !is_valid_email(&email) {
                return Err(AppError::bad_request("Invalid email format", json!({})));
            }
            if let Some(other) = self.users.find_by_email(&email).await? {
                if other.id != id {
                    return Err(AppError::conflict(
                        "Email already exists",
                        json!({ "email": email }),
                    ));
                }
            }
            patch.email = Some(email);
        }

        self.users.update(id, patch).await
    }

    /// Deletes a user, refusing while they still own orders.
    ///
    /// Returns the deleted record so the handler can build the confirmation
    /// message.
    pub async fn delete(&self, id: i64) -> Result<User, AppError> {
        let user = self.get(id).await?;

        let order_count = self.orders.count_for_user(id).await?;
        if order_count > 0 {
            return Err(AppError::bad_request(
                "Cannot delete user with existing orders",
                json!({ "order_count": order_count }),
            ));
        }

        self.users.delete(id).await?;
        Ok(user)
    }
}

/// Trims and normalizes a raw user payload, enforcing presence and email
/// format. Returns `(name, email)` ready for persistence.
fn validate_user_fields(draft: &UserDraft) -> Result<(String, String), AppError> {
    let name = draft.name.as_deref().unwrap_or_default().trim().to_string();
    let email = draft
        .email
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    if name.is_empty() {
        return Err(AppError::bad_request("Name is required", json!({})));
    }
    if email.is_empty() {
        return Err(AppError::bad_request("Email is required", json!({})));
    }
    if !is_valid_email(&email) {
        return Err(AppError::bad_request("Invalid email format", json!({})));
    }

    Ok((name, email))
}
