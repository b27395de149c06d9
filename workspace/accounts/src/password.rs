//! Password hashing.
//!
//! Hashes are Argon2id encoded in the PHC string format. Verification reads
//! the cost parameters from the stored hash, so changing [`HashingParams`]
//! only affects newly hashed passwords.
//!
//! A password that must never match (a user created without one) is stored
//! as `!` followed by random characters. No PHC string starts with `!`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use tracing::{debug, trace};

use crate::error::{AccountsError, Result};

pub const UNUSABLE_PASSWORD_PREFIX: char = '!';
const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;

/// Argon2 cost parameters.
///
/// - `memory_kib`: memory cost in KiB
/// - `iterations`: time cost
/// - `parallelism`: lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingParams {
    /// 19 MiB memory, 2 iterations, parallelism 1.
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(params: HashingParams) -> Result<Self> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| AccountsError::PasswordHash(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password and return a PHC-encoded Argon2id hash string.
    pub fn hash(&self, password: &str) -> Result<String> {
        trace!("Hashing password");
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)?
            .to_string();
        Ok(hash)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns:
    /// - Ok(true)  if password matches
    /// - Ok(false) if password does not match or the stored value is unusable
    /// - Err(_)    if the stored hash is malformed
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool> {
        if !Self::is_usable(encoded) {
            debug!("Refusing to verify against an unusable password");
            return Ok(false);
        }

        let parsed = PasswordHash::new(encoded)?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// A value that never verifies against any password.
    pub fn make_unusable(&self) -> String {
        let mut suffix = String::with_capacity(UNUSABLE_PASSWORD_SUFFIX_LENGTH + 22);
        while suffix.len() < UNUSABLE_PASSWORD_SUFFIX_LENGTH {
            suffix.push_str(SaltString::generate(&mut OsRng).as_str());
        }
        suffix.truncate(UNUSABLE_PASSWORD_SUFFIX_LENGTH);

        format!("{UNUSABLE_PASSWORD_PREFIX}{suffix}")
    }

    pub fn is_usable(encoded: &str) -> bool {
        !encoded.is_empty() && !encoded.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fast_hasher;

    #[test]
    fn test_hash_is_not_plaintext_and_verifies() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = fast_hasher();
        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret", &first).unwrap());
        assert!(hasher.verify("secret", &second).unwrap());
    }

    #[test]
    fn test_verify_uses_parameters_from_stored_hash() {
        let cheap = fast_hasher();
        let hash = cheap.hash("secret").unwrap();

        let other = PasswordHasher::new(HashingParams {
            memory_kib: 16,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(other.verify("secret", &hash).unwrap());
    }

    #[test]
    fn test_unusable_password_never_verifies() {
        let hasher = fast_hasher();
        let unusable = hasher.make_unusable();

        assert!(unusable.starts_with(UNUSABLE_PASSWORD_PREFIX));
        assert_eq!(unusable.len(), UNUSABLE_PASSWORD_SUFFIX_LENGTH + 1);
        assert!(!PasswordHasher::is_usable(&unusable));
        assert!(!hasher.verify("", &unusable).unwrap());
        assert!(!hasher.verify(&unusable, &unusable).unwrap());
        assert_ne!(unusable, hasher.make_unusable());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = fast_hasher();
        let result = hasher.verify("secret", "not-a-phc-string");

        assert!(matches!(result, Err(AccountsError::PasswordHash(_))));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let result = PasswordHasher::new(HashingParams {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        });

        assert!(matches!(result, Err(AccountsError::PasswordHash(_))));
    }
}
