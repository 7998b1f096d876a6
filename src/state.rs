//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{OrderService, UserService};

/// Handler-visible application state. Cheap to clone; services are shared
/// behind `Arc` and hold the repository seams.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub order_service: Arc<OrderService>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService>, order_service: Arc<OrderService>) -> Self {
        Self {
            user_service,
            order_service,
        }
    }
}
