mod memory;

pub use memory::MemoryStore;

use crate::error::AppResult;
use crate::models::User;

/// Registered users keyed by email.
pub trait CredentialStore: Send + Sync {
    /// Insert `user` unless the email is already taken, in which case
    /// this fails with `AppError::Conflict` and nothing changes.
    fn insert_user(&self, user: User) -> AppResult<()>;

    fn find_user(&self, email: &str) -> AppResult<Option<User>>;
}

/// Session tokens mapped to the email they authenticate.
pub trait SessionStore: Send + Sync {
    fn put_session(&self, token: &str, email: &str) -> AppResult<()>;

    fn find_session(&self, token: &str) -> AppResult<Option<String>>;

    /// Removing an unknown token is a no-op.
    fn delete_session(&self, token: &str) -> AppResult<()>;
}
