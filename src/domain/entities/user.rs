//! User entity and its creation/update inputs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered user.
///
/// `order_count` is derived by the repository (never the full order list) so
/// that serialized users stay bounded in size regardless of how many orders
/// they own.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub order_count: i64,
}

/// Input data for creating a new user.
///
/// Fields are expected to be pre-validated: `name` trimmed and non-empty,
/// `email` trimmed, lower-cased, and format-checked.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update for an existing user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}
