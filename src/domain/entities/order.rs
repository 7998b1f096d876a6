//! Order entity and its status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Processing state of an order.
///
/// There is no state machine: any valid status may replace any other. The
/// only constraint is membership in this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Parses a status case-insensitively. Returns `None` for anything
    /// outside the valid set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Comma-separated valid set, used in validation error messages.
    pub fn valid_set() -> &'static str {
        "pending, completed, cancelled"
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order placed by a user.
///
/// `user_name` comes from a join with the owning user and is `None` if the
/// relation is broken.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product_name: String,
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
}

/// Input data for creating a new order.
///
/// `product_name` is expected trimmed and non-empty, `amount` strictly
/// positive, and `user_id` checked for existence by the service. Status
/// always starts as `pending`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub product_name: String,
    pub amount: f64,
}
