//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User storage and lookups
//! - [`PgOrderRepository`] - Order storage, filtering, and status updates

pub mod pg_order_repository;
pub mod pg_user_repository;

pub use pg_order_repository::PgOrderRepository;
pub use pg_user_repository::PgUserRepository;
