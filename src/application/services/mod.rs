//! Business logic services for the application layer.

pub mod order_service;
pub mod user_service;

pub use order_service::OrderService;
pub use user_service::UserService;

/// One page of a listing plus the totals the list envelope reports.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub total_pages: i64,
}

/// Computes `ceil(total / per_page)`; zero rows means zero pages.
pub(crate) fn total_pages(total: i64, per_page: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(100, 100), 1);
    }
}
