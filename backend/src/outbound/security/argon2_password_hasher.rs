//! Argon2id implementation of the `PasswordHasher` port.

use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SALT_BYTES: usize = 16;

/// Hashes passwords into Argon2id PHC strings.
///
/// Verification reads the parameters embedded in the stored digest, so
/// digests produced under older cost settings keep working.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Hasher with the crate's recommended costs.
    pub fn new() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }

    /// Hasher with explicit costs.
    ///
    /// Tests use the smallest accepted costs to keep suites fast.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] when argon2 rejects the costs.
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; SALT_BYTES]>())
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        let digest = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordDigest::new(digest.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest.as_ref())
            .map_err(|err| PasswordHashError::hash(format!("stored digest unreadable: {err}")))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}
