//! Pagination and filtering query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Validated pagination window ready for a SQL query.
#[derive(Debug, Clone, Copy)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
}

/// Validates raw `page`/`per_page` query values.
///
/// # Defaults
///
/// - `page`: 1
/// - `per_page`: 10
///
/// # Validation
///
/// - Page must be > 0
/// - Per page must be between 1 and 100
pub fn validate_pagination(
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<PageWindow, String> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(10);

    if page < 1 {
        return Err("Page must be greater than 0".to_string());
    }
    if !(1..=100).contains(&per_page) {
        return Err("Per page must be between 1 and 100".to_string());
    }

    Ok(PageWindow {
        page: page as i64,
        per_page: per_page as i64,
    })
}

/// Trims a raw `search` query value; empty and whitespace-only become `None`.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Query parameters for the user list endpoint.
///
/// Uses `serde_with` to parse numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<u32>,

    #[serde(default)]
    pub search: Option<String>,
}

/// Query parameters for the order list endpoint. Adds an owner filter on top
/// of the shared pagination/search contract.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<u32>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Query parameters for the order export endpoint.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct OrderExportParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub user_id: Option<i64>,
}
