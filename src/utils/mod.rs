//! Shared helper functions.
//!
//! - [`validation`] - email format and amount parsing checks

pub mod validation;
