//! SHA-256 password digests salted with a process-wide secret.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::ports::PasswordHasher;

/// Hex-encoded `SHA-256(salt || password)`.
///
/// # Examples
/// ```
/// use thing_repository::domain::ports::PasswordHasher;
/// use thing_repository::outbound::security::SaltedPasswordHasher;
///
/// let hasher = SaltedPasswordHasher::new("pepper");
/// let digest = hasher.hash("Secret123");
/// assert!(hasher.verify(&digest, "Secret123"));
/// assert!(!hasher.verify(&digest, "Secret124"));
/// ```
pub struct SaltedPasswordHasher {
    salt: Zeroizing<String>,
}

impl SaltedPasswordHasher {
    /// Create a hasher using `salt` for every digest.
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: Zeroizing::new(salt.into()),
        }
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

impl PasswordHasher for SaltedPasswordHasher {
    fn hash(&self, plain: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(plain.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn verify(&self, digest: &str, plain: &str) -> bool {
        let expected = self.hash(plain);
        constant_time_eq(expected.as_bytes(), digest.as_bytes())
    }
}
