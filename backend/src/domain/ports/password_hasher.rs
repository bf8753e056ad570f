//! Port for one-way password digests.

/// Salted one-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Digest a plain-text password.
    fn hash(&self, plain: &str) -> String;

    /// Whether `plain` produces `digest`. Implementations compare in
    /// constant time.
    fn verify(&self, digest: &str, plain: &str) -> bool;
}
