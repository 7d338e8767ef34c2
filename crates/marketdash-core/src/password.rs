//! Password hashing and verification.
//!
//! Digests are bcrypt strings (`$2b$<cost>$<salt><hash>`), salted per call.
//! Verification never fails loudly: a wrong password and a digest that cannot
//! be parsed both come back as `false`.
//!
//! bcrypt is deliberately slow. Async callers should run [`PasswordHasher`] on a
//! blocking thread (`tokio::task::spawn_blocking`).

use bcrypt::{DEFAULT_COST, hash, verify};
use thiserror::Error;

/// Lowest and highest work factors bcrypt accepts.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// bcrypt with a configured work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    /// Work factors outside bcrypt's range are clamped into it.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(hash(password, self.cost)?)
    }

    /// The digest carries its own cost, so this ignores `self.cost`.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "stored password digest could not be parsed");
                false
            }
        }
    }
}
