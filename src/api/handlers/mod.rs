//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod hello;
pub mod orders;
pub mod users;

pub use hello::hello_handler;
pub use orders::{
    batch_create_orders_handler, create_order_handler, export_orders_handler,
    list_orders_handler, update_order_status_handler,
};
pub use users::{
    batch_create_users_handler, create_user_handler, delete_user_handler, export_users_handler,
    list_users_handler, update_user_handler, user_orders_handler,
};
