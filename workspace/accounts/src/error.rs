use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::{error, warn};

/// Error types for the accounts module
#[derive(Error, Debug)]
pub enum AccountsError {
    /// Input rejected before touching the database
    /// (empty email, superuser flag overrides, self-follow, over-long fields).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced user does not exist
    #[error("User {0} not found")]
    UserNotFound(i32),

    /// Error from the password hasher or a malformed stored hash
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Error from the database operations, including integrity violations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AccountsError {
    pub fn validation(message: impl Into<String>) -> Self {
        let err = AccountsError::Validation(message.into());
        warn!(?err, "Validation failed");
        err
    }

    /// True when the database refused a write because of a unique constraint,
    /// e.g. an email address that is already registered.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AccountsError::Database(db_err) => matches!(
                db_err.sql_err(),
                Some(SqlErr::UniqueConstraintViolation(_))
            ),
            _ => false,
        }
    }
}

impl From<argon2::password_hash::Error> for AccountsError {
    fn from(error: argon2::password_hash::Error) -> Self {
        let err = AccountsError::PasswordHash(error.to_string());
        error!(?err, "Password hasher error");
        err
    }
}

/// Type alias for Result with AccountsError
pub type Result<T> = std::result::Result<T, AccountsError>;
