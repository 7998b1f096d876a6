//! Handlers for user management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::pagination::{UserListParams, normalize_search, validate_pagination};
use crate::api::dto::users::{
    BatchCreateUsersRequest, BatchUsersResponse, DeleteUserResponse, ExportUsersResponse,
    UserListResponse, UserOrdersResponse,
};
use crate::application::batch::{MAX_BATCH_SIZE, UserDraft};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Errors
///
/// Returns 400 for missing/empty fields, a malformed email, or a duplicate
/// email (checked case-insensitively).
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<UserDraft>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.user_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Lists users with pagination and optional search.
///
/// # Endpoint
///
/// `GET /api/users?page=1&per_page=10&search=alice`
///
/// `search` matches case-insensitively as a substring against name OR email.
///
/// # Errors
///
/// Returns 400 when `page < 1` or `per_page` is outside `[1, 100]`.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> Result<Json<UserListResponse>, AppError> {
    let window = validate_pagination(params.page, params.per_page)
        .map_err(|message| AppError::bad_request(message, json!({})))?;
    let search = normalize_search(params.search.as_deref());

    let page = state
        .user_service
        .list(window.page, window.per_page, search.as_deref())
        .await?;

    Ok(Json(UserListResponse {
        users: page.items,
        total: page.total,
        page: window.page,
        per_page: window.per_page,
        total_pages: page.total_pages,
        search,
    }))
}

/// Returns a user together with all of their orders, in insertion order,
/// unpaginated.
///
/// # Endpoint
///
/// `GET /api/users/{id}/orders`
///
/// # Errors
///
/// Returns 404 if the user doesn't exist.
pub async fn user_orders_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserOrdersResponse>, AppError> {
    let (user, orders) = state.user_service.orders_for_user(id).await?;

    Ok(Json(UserOrdersResponse {
        user,
        total_orders: orders.len(),
        orders,
    }))
}

/// Exports every user, unpaginated, with a generation timestamp.
///
/// # Endpoint
///
/// `GET /api/users/export`
pub async fn export_users_handler(
    State(state): State<AppState>,
) -> Result<Json<ExportUsersResponse>, AppError> {
    let users = state.user_service.export().await?;

    Ok(Json(ExportUsersResponse {
        success: true,
        total: users.len(),
        users,
        exported_at: Utc::now(),
    }))
}

/// Creates up to 1000 users in one request with a single shared commit.
///
/// # Endpoint
///
/// `POST /api/users/batch`
///
/// # Batch Processing
///
/// Elements are validated independently; invalid ones are reported in the
/// `errors` array (index, submitted data, message) without aborting the
/// rest. Duplicate emails are rejected against both the store and earlier
/// elements of the same batch.
///
/// # Response Codes
///
/// - **201 Created**: at least one user was persisted
/// - **400 Bad Request**: malformed batch, or every element failed
pub async fn batch_create_users_handler(
    State(state): State<AppState>,
    Json(payload): Json<BatchCreateUsersRequest>,
) -> Result<(StatusCode, Json<BatchUsersResponse>), AppError> {
    let Some(users) = payload.users else {
        return Err(AppError::bad_request("users array is required", json!({})));
    };
    if users.is_empty() {
        return Err(AppError::bad_request(
            "users array cannot be empty",
            json!({}),
        ));
    }
    if users.len() > MAX_BATCH_SIZE {
        return Err(AppError::bad_request(
            format!("Maximum {MAX_BATCH_SIZE} users per batch"),
            json!({}),
        ));
    }

    let total_processed = users.len();
    let outcome = state.user_service.batch_create(users).await?;

    let status = if outcome.created.is_empty() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(BatchUsersResponse {
            success: true,
            created: outcome.created.len(),
            failed: outcome.errors.len(),
            total_processed,
            users: outcome.created,
            errors: (!outcome.errors.is_empty()).then_some(outcome.errors),
        }),
    ))
}

/// Partially updates a user. `name` and `email` are each optional; present
/// fields must be non-empty after trimming.
///
/// # Endpoint
///
/// `PUT /api/users/{id}`
///
/// # Errors
///
/// Returns 404 if the user doesn't exist, 400 for empty fields, a malformed
/// email, or an email already used by a different user.
pub async fn update_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UserDraft>,
) -> Result<Json<User>, AppError> {
    let user = state.user_service.update(id, payload).await?;
    Ok(Json(user))
}

/// Deletes a user, refusing while they still own orders.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
///
/// # Errors
///
/// Returns 404 if the user doesn't exist, and 400 (carrying the current
/// `order_count`) when the user owns at least one order.
pub async fn delete_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteUserResponse>, AppError> {
    let user = state.user_service.delete(id).await?;

    Ok(Json(DeleteUserResponse {
        success: true,
        message: format!("User {} deleted successfully", user.name),
    }))
}
