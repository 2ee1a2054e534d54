/**
 * Password Hashing
 *
 * One-way bcrypt hashing for stored credentials. Verification goes through
 * bcrypt's own comparison, which is constant-time with respect to the
 * candidate password.
 */

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Check a candidate password against a stored hash.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<bool, BcryptError> {
    verify(candidate, stored_hash)
}
