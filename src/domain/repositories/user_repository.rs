//! Repository trait for user data access.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing users.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a single user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken (unique
    /// index race) and [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Creates a batch of users inside one transaction.
    ///
    /// Either every user in `new_users` is persisted or none is: any failure
    /// rolls the whole transaction back.
    async fn create_batch(&self, new_users: Vec<NewUser>) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by email, compared case-insensitively.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Returns every stored email address. Used by batch creation to check
    /// duplicates against the store in one round trip.
    async fn all_emails(&self) -> Result<Vec<String>, AppError>;

    /// Lists users ordered by id, optionally filtered by a case-insensitive
    /// substring match against name or email.
    async fn list<'a>(
        &self,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError>;

    /// Counts users matching the same filter as [`Self::list`].
    async fn count<'a>(&self, search: Option<&'a str>) -> Result<i64, AppError>;

    /// Returns all users, unpaginated, in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, AppError>;

    /// Applies a partial update. `None` fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches `id`.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError>;

    /// Deletes a user. Returns `false` if no row matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
