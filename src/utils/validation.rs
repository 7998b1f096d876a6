//! Input validation helpers shared by the user and order services.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Compiled email format pattern (RFC-5322-ish, intentionally permissive).
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Returns true iff `email` matches the accepted format. Pure function.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Reason an order amount was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    NotANumber,
    NotPositive,
}

impl AmountError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotANumber => "Amount must be a valid number",
            Self::NotPositive => "Amount must be greater than 0",
        }
    }
}

/// Parses an order amount from a JSON value.
///
/// Accepts a JSON number or a numeric string (clients paste amounts as
/// strings in batch uploads) and requires the result to be strictly
/// positive. Everything else is [`AmountError::NotANumber`].
pub fn parse_amount(value: &Value) -> Result<f64, AmountError> {
    let amount = match value {
        Value::Number(n) => n.as_f64().ok_or(AmountError::NotANumber)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| AmountError::NotANumber)?,
        _ => return Err(AmountError::NotANumber),
    };

    if amount > 0.0 {
        Ok(amount)
    } else {
        Err(AmountError::NotPositive)
    }
}
