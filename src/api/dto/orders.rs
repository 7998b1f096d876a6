//! DTOs for order endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::batch::{BatchError, OrderDraft};
use crate::domain::entities::Order;

/// Request body for batch order creation.
#[derive(Debug, Deserialize)]
pub struct BatchCreateOrdersRequest {
    pub orders: Option<Vec<OrderDraft>>,
}

/// Request body for the status update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

/// Paginated order listing envelope. Rows are newest-first.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub search: Option<String>,
}

/// Full order export with a generation timestamp and the active filters
/// echoed back (`{}` when none).
#[derive(Debug, Serialize)]
pub struct ExportOrdersResponse {
    pub success: bool,
    pub total: usize,
    pub orders: Vec<Order>,
    pub exported_at: DateTime<Utc>,
    pub filters: Value,
}

/// Batch creation envelope for orders.
#[derive(Debug, Serialize)]
pub struct BatchOrdersResponse {
    pub success: bool,
    pub created: usize,
    pub failed: usize,
    pub total_processed: usize,
    pub orders: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BatchError>>,
}
