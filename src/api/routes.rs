//! API route configuration.

use crate::api::handlers::{
    batch_create_orders_handler, batch_create_users_handler, create_order_handler,
    create_user_handler, delete_user_handler, export_orders_handler, export_users_handler,
    hello_handler, list_orders_handler, list_users_handler, update_order_status_handler,
    update_user_handler, user_orders_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post, put},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /hello`              - Liveness probe
/// - `POST   /users`              - Create a user
/// - `GET    /users`              - List users (paginated, searchable)
/// - `GET    /users/export`       - Export all users
/// - `POST   /users/batch`        - Batch-create users
/// - `PUT    /users/{id}`         - Update a user's name/email
/// - `DELETE /users/{id}`         - Delete a user (blocked while they own orders)
/// - `GET    /users/{id}/orders`  - A user with all of their orders
/// - `POST   /orders`             - Create an order
/// - `GET    /orders`             - List orders (paginated, filterable, newest-first)
/// - `GET    /orders/export`      - Export orders
/// - `POST   /orders/batch`       - Batch-create orders
/// - `PATCH  /orders/{id}`        - Update an order's status
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello_handler))
        .route("/users", post(create_user_handler).get(list_users_handler))
        .route("/users/export", get(export_users_handler))
        .route("/users/batch", post(batch_create_users_handler))
        .route(
            "/users/{id}",
            put(update_user_handler).delete(delete_user_handler),
        )
        .route("/users/{id}/orders", get(user_orders_handler))
        .route(
            "/orders",
            post(create_order_handler).get(list_orders_handler),
        )
        .route("/orders/export", get(export_orders_handler))
        .route("/orders/batch", post(batch_create_orders_handler))
        .route("/orders/{id}", patch(update_order_status_handler))
}
