//! Shared types for batch create operations.
//!
//! Batch endpoints validate every element independently, accumulate the valid
//! ones, and persist them with a single commit. Failures are collected per
//! item so one bad record never aborts the rest of the batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of elements accepted by a batch request.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Raw user payload as submitted by the client, single or batch.
///
/// All fields are optional so that per-field "is required" errors can be
/// produced instead of a blanket deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Raw order payload as submitted by the client, single or batch.
///
/// `amount` stays a raw JSON value until validated: clients send both
/// numbers and numeric strings, and non-numbers need their own error
/// message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub user_id: Option<i64>,
    pub product_name: Option<String>,
    pub amount: Option<Value>,
}

/// A rejected batch element.
///
/// `data` echoes the submitted payload for user batches; order batches
/// report only the index and message.
#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub error: String,
}

/// Result of a batch create: records persisted by the shared commit plus the
/// per-item errors. `created` is empty when nothing was valid.
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    pub created: Vec<T>,
    pub errors: Vec<BatchError>,
}
