//! Application user lookup.

/// A user of the application that can be signed in through ADFS.
pub trait AdfsUser: Send + Sync {
    /// Returns the unique identifier of the user.
    fn id(&self) -> String;
}

/// Provider for looking up application users by the username ADFS reports.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// The user type returned by this directory.
    type User: AdfsUser;

    /// Finds the user with the given (lower-cased) username or email.
    ///
    /// Returns `Ok(None)` when no such user exists.
    async fn find_by_username(&self, username: &str) -> Result<Option<Self::User>, DirectoryError>;
}

/// Error type for user directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
