//! Password hashing using Argon2.

use booking_core::{BookingError, BookingResult, Interface};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Interface for password hashing operations.
pub trait PasswordHasherInterface: Interface + Send + Sync {
    /// Hashes a plaintext password into a PHC string.
    fn hash(&self, plaintext: &str) -> BookingResult<String>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// Any failure, including a malformed hash, reads as a mismatch.
    fn verify(&self, hash: &str, plaintext: &str) -> bool;
}

/// Argon2id password hasher.
///
/// As a component it falls back to argon2's default parameters unless the
/// module is given a configured instance.
#[derive(Component, Clone)]
#[shaku(interface = PasswordHasherInterface)]
pub struct PasswordHasher {
    #[shaku(default)]
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a password hasher from a memory cost in KiB.
    #[must_use]
    pub fn with_cost(memory_kib: u32) -> Self {
        let params = Params::new(
            memory_kib, // Memory cost in KiB
            2,          // Time cost (iterations)
            1,          // Parallelism
            None,       // Output length (default)
        )
        .unwrap_or(Params::DEFAULT);

        Self::with_params(params)
    }
}

impl From<PasswordHasher> for PasswordHasherParameters {
    fn from(hasher: PasswordHasher) -> Self {
        Self {
            argon2: hasher.argon2,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, plaintext: &str) -> BookingResult<String> {
        if plaintext.is_empty() {
            warn!("Refusing to hash an empty password");
            return Err(BookingError::internal("password must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| {
                error!("Failed to hash password: {}", e);
                BookingError::internal(format!("Failed to hash password: {}", e))
            })?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    fn verify(&self, hash: &str, plaintext: &str) -> bool {
        if hash.is_empty() || plaintext.is_empty() {
            warn!("Password verification called with an empty argument");
            return false;
        }

        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Invalid password hash format: {}", e);
                return false;
            }
        };

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => {
                debug!("Password verified successfully");
                true
            }
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                false
            }
            Err(e) => {
                warn!("Password verification error: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(1024)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("my_secure_password").unwrap();

        assert_ne!(hash, "my_secure_password");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(&hash, "my_secure_password"));
        assert!(!hasher.verify(&hash, "wrong_password"));
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let hasher = hasher();
        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_password_is_an_error() {
        assert!(hasher().hash("").is_err());
    }

    #[test]
    fn test_verify_swallows_bad_input() {
        let hasher = hasher();
        assert!(!hasher.verify("", "password"));
        assert!(!hasher.verify("not-a-phc-string", "password"));

        let hash = hasher.hash("password").unwrap();
        assert!(!hasher.verify(&hash, ""));
    }
}
