//! Data Transfer Objects for request/response serialization.
//!
//! Request DTOs use explicit `Option` fields so handlers can report specific
//! "is required" messages instead of opaque deserialization failures.
//!
//! # Modules
//!
//! - [`pagination`] - Shared query parameter types and validation
//! - [`users`] - User endpoint payloads and envelopes
//! - [`orders`] - Order endpoint payloads and envelopes

pub mod orders;
pub mod pagination;
pub mod users;
