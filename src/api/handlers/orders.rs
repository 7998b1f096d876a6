//! Handlers for order management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::orders::{
    BatchCreateOrdersRequest, BatchOrdersResponse, ExportOrdersResponse, OrderListResponse,
    UpdateOrderStatusRequest,
};
use crate::api::dto::pagination::{
    OrderExportParams, OrderListParams, normalize_search, validate_pagination,
};
use crate::application::batch::{MAX_BATCH_SIZE, OrderDraft};
use crate::domain::entities::Order;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new order for an existing user. Status starts as `pending`.
///
/// # Endpoint
///
/// `POST /api/orders`
///
/// # Errors
///
/// Returns 400 for a missing `user_id`, an empty `product_name`, or an
/// `amount` that is missing, non-numeric, or not strictly positive; 404 when
/// the referenced user doesn't exist.
pub async fn create_order_handler(
    State(state): State<AppState>,
    Json(payload): Json<OrderDraft>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state.order_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Lists orders newest-first with pagination, optional owner filter, and
/// optional product name search.
///
/// # Endpoint
///
/// `GET /api/orders?page=1&per_page=10&user_id=7&search=widget`
///
/// # Errors
///
/// Returns 400 when `page < 1` or `per_page` is outside `[1, 100]`.
pub async fn list_orders_handler(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> Result<Json<OrderListResponse>, AppError> {
    let window = validate_pagination(params.page, params.per_page)
        .map_err(|message| AppError::bad_request(message, json!({})))?;
    let search = normalize_search(params.search.as_deref());

    let page = state
        .order_service
        .list(window.page, window.per_page, params.user_id, search.as_deref())
        .await?;

    Ok(Json(OrderListResponse {
        orders: page.items,
        total: page.total,
        page: window.page,
        per_page: window.per_page,
        total_pages: page.total_pages,
        search,
    }))
}

/// Exports orders newest-first, optionally filtered by owner, echoing the
/// active filters back.
///
/// # Endpoint
///
/// `GET /api/orders/export?user_id=7`
pub async fn export_orders_handler(
    State(state): State<AppState>,
    Query(params): Query<OrderExportParams>,
) -> Result<Json<ExportOrdersResponse>, AppError> {
    let orders = state.order_service.export(params.user_id).await?;

    let filters = match params.user_id {
        Some(user_id) => json!({ "user_id": user_id }),
        None => json!({}),
    };

    Ok(Json(ExportOrdersResponse {
        success: true,
        total: orders.len(),
        orders,
        exported_at: Utc::now(),
        filters,
    }))
}

/// Creates up to 1000 orders in one request with a single shared commit.
///
/// # Endpoint
///
/// `POST /api/orders/batch`
///
/// # Batch Processing
///
/// Elements are validated independently (field presence, amount parsing,
/// then user existence); invalid ones are reported in the `errors` array by
/// index without aborting the rest.
///
/// # Response Codes
///
/// - **201 Created**: at least one order was persisted
/// - **400 Bad Request**: malformed batch, or every element failed
pub async fn batch_create_orders_handler(
    State(state): State<AppState>,
    Json(payload): Json<BatchCreateOrdersRequest>,
) -> Result<(StatusCode, Json<BatchOrdersResponse>), AppError> {
    let Some(orders) = payload.orders else {
        return Err(AppError::bad_request("orders array is required", json!({})));
    };
    if orders.is_empty() {
        return Err(AppError::bad_request(
            "orders array cannot be empty",
            json!({}),
        ));
    }
    if orders.len() > MAX_BATCH_SIZE {
        return Err(AppError::bad_request(
            format!("Maximum {MAX_BATCH_SIZE} orders per batch"),
            json!({}),
        ));
    }

    let total_processed = orders.len();
    let outcome = state.order_service.batch_create(orders).await?;

    let status = if outcome.created.is_empty() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(BatchOrdersResponse {
            success: true,
            created: outcome.created.len(),
            failed: outcome.errors.len(),
            total_processed,
            orders: outcome.created,
            errors: (!outcome.errors.is_empty()).then_some(outcome.errors),
        }),
    ))
}

/// Updates an order's status. Any valid status may replace any other.
///
/// # Endpoint
///
/// `PATCH /api/orders/{id}`
///
/// # Errors
///
/// Returns 404 if the order doesn't exist, and 400 when `status` is missing
/// or (case-insensitively) outside `pending`/`completed`/`cancelled`.
pub async fn update_order_status_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, AppError> {
    let order = state.order_service.update_status(id, payload.status).await?;
    Ok(Json(order))
}
