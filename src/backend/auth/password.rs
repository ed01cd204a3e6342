//! Password Hashing
//!
//! Wraps bcrypt. Every call to [`PasswordHasher::hash`] draws a fresh salt,
//! so equal passwords never produce equal digests. Verification reads the
//! salt and cost back out of the stored digest.
//!
//! bcrypt is deliberately slow; the async variants move the work onto the
//! blocking pool so request handlers do not stall the runtime.

use thiserror::Error;

/// Cost factor used when none is configured
pub const DEFAULT_PASSWORD_COST: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("password hashing task failed: {0}")]
    Task(String),
}

/// Salted adaptive password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Check a plaintext password against a stored digest
    ///
    /// Never fails: a digest that cannot be parsed simply does not match.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password digest could not be checked: {:?}", e);
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking pool
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking pool
    pub async fn verify_blocking(&self, plaintext: String, digest: String) -> bool {
        let hasher = *self;
        match tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password verification task failed: {:?}", e);
                false
            }
        }
    }
}
