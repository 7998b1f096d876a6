//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Each entity has
//! a companion input struct for creation (`NewUser`, `NewOrder`) and, where
//! partial updates exist, a patch struct (`UserPatch`).

pub mod order;
pub mod user;

pub use order::{NewOrder, Order, OrderStatus};
pub use user::{NewUser, User, UserPatch};
