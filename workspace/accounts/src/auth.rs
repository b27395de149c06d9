use model::entities::user;

use crate::error::Result;
use crate::password::PasswordHasher;

/// What authentication needs to know about an account.
///
/// Kept apart from the profile data so the login rules do not depend on
/// how or where a user's profile is stored.
pub trait Credentials {
    /// The identifier the user logs in with.
    fn login_id(&self) -> &str;

    /// Stored password hash (or unusable marker).
    fn password_hash(&self) -> &str;

    fn is_active(&self) -> bool;

    fn is_staff(&self) -> bool;

    fn is_superuser(&self) -> bool;

    fn has_usable_password(&self) -> bool {
        PasswordHasher::is_usable(self.password_hash())
    }

    /// Staff or superuser.
    fn is_privileged(&self) -> bool {
        self.is_staff() || self.is_superuser()
    }

    /// Checks `raw` against the stored hash. Inactive accounts and unusable
    /// passwords never match.
    fn check_password(&self, hasher: &PasswordHasher, raw: &str) -> Result<bool> {
        if !self.is_active() || !self.has_usable_password() {
            return Ok(false);
        }
        hasher.verify(raw, self.password_hash())
    }
}

impl Credentials for user::Model {
    fn login_id(&self) -> &str {
        &self.email
    }

    fn password_hash(&self) -> &str {
        &self.password
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_staff(&self) -> bool {
        self.is_staff
    }

    fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}
