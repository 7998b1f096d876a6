//! Application error type and its HTTP mapping.
//!
//! All handler and service errors funnel through [`AppError`]. The JSON body
//! is always `{"error": "<message>"}`; variants may attach extra top-level
//! fields through `details` (e.g. `order_count` on a blocked user delete).
//!
//! Status mapping: validation and conflict errors are both reported as
//! 400 Bad Request (a duplicate email is a client mistake in this API, not a
//! separate 409 surface), missing entities as 404, everything else as 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            AppError::NotFound { message, details } => (StatusCode::NOT_FOUND, message, details),
            AppError::Conflict { message, details } => (StatusCode::BAD_REQUEST, message, details),
            AppError::Internal { message, details } => {
                tracing::error!(error = %message, ?details, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message, details)
            }
        };

        let mut body = serde_json::Map::new();
        body.insert("error".to_string(), Value::String(message));
        if let Value::Object(extra) = details {
            for (key, value) in extra {
                body.entry(key).or_insert(value);
            }
        }

        (status, Json(Value::Object(body))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                // The only unique index in the schema is lower(email); a
                // violation here means a duplicate slipped past the
                // application-level check in a concurrent request.
                let message = if db.constraint() == Some("users_email_lower_key") {
                    "Email already exists"
                } else {
                    "Unique constraint violation"
                };
                return AppError::conflict(message, json!({ "constraint": db.constraint() }));
            }
        }

        AppError::internal(e.to_string(), json!({}))
    }
}
