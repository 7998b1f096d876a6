//! DTOs for user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::batch::{BatchError, UserDraft};
use crate::domain::entities::{Order, User};

/// Request body for batch user creation.
///
/// `users` is optional so a missing key gets its own message instead of a
/// generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct BatchCreateUsersRequest {
    pub users: Option<Vec<UserDraft>>,
}

/// Paginated user listing envelope.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub search: Option<String>,
}

/// A user together with all of their orders.
#[derive(Debug, Serialize)]
pub struct UserOrdersResponse {
    pub user: User,
    pub orders: Vec<Order>,
    pub total_orders: usize,
}

/// Full user export with a generation timestamp.
#[derive(Debug, Serialize)]
pub struct ExportUsersResponse {
    pub success: bool,
    pub total: usize,
    pub users: Vec<User>,
    pub exported_at: DateTime<Utc>,
}

/// Batch creation envelope: counts, the created records, and per-item
/// errors (omitted when every element was valid).
#[derive(Debug, Serialize)]
pub struct BatchUsersResponse {
    pub success: bool,
    pub created: usize,
    pub failed: usize,
    pub total_processed: usize,
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BatchError>>,
}

/// Confirmation returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}
