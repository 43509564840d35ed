//! Persistence port for users.

use crate::user::User;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Errors raised by a [`UserRepository`].
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("email `{0}` is already used")]
    DuplicateEmail(String),

    #[error("no user with id {0}")]
    NotFound(i64),

    #[error("SQL request failed: {0}")]
    Sql(#[from] sqlx::Error),
}

/// Data access facade over [`User`].
///
/// A lookup miss is `Ok(None)`, never an error.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert `user` when it has no `id`, update the matching row otherwise.
    ///
    /// Returns the stored representation, with `id` populated on insert.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateEmail`] when another user already
    /// owns the email and [`RepositoryError::NotFound`] when `id` matches no
    /// row.
    async fn save(&self, user: User) -> Result<User>;

    /// Same as [`UserRepository::save`], and the write is visible to every
    /// later read once this returns.
    ///
    /// Implementations commit on `save` already, so this delegates.
    async fn save_and_flush(&self, user: User) -> Result<User> {
        self.save(user).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Every user, ordered by `id`.
    async fn find_all(&self) -> Result<Vec<User>>;

    async fn count(&self) -> Result<u64>;

    /// Remove `user`. A user which was never saved is ignored.
    async fn delete(&self, user: &User) -> Result<()> {
        match user.id {
            Some(id) => self.delete_by_id(id).await,
            None => {
                tracing::debug!(email = %user.email, "skip deletion of unsaved user");
                Ok(())
            },
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<()>;
}
