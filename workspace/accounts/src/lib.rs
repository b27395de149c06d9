pub mod auth;
pub mod error;
pub mod follow;
pub mod manager;
pub mod password;

#[cfg(test)]
mod testing;

pub use auth::Credentials;
pub use error::{AccountsError, Result};
pub use follow::FollowCounts;
pub use manager::{ExtraFields, ProfileChanges, UserManager};
pub use password::{HashingParams, PasswordHasher};

use sea_orm::DatabaseConnection;

/// Returns a user manager with the default Argon2 cost parameters.
pub fn default_manager(db: DatabaseConnection) -> UserManager {
    UserManager::new(db, PasswordHasher::default())
}
