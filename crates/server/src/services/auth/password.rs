//! Password hashing.
//!
//! Argon2id with a fresh random salt per hash. The digest is a
//! self-describing PHC string embedding the algorithm, parameters, and
//! salt, so verification needs nothing but the digest itself. Plaintext is
//! never logged or stored.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Errors from hashing a password.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed")]
pub struct HashError;

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `HashError` if the hash cannot be computed. This is an internal
/// failure, never caused by the password's content.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| HashError)
}

/// Verify a password against a stored digest in constant time.
///
/// A malformed digest yields `false`, never an error: from the caller's
/// point of view it is indistinguishable from a wrong password.
#[must_use]
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let digest = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &digest));
        assert!(!verify_password("wrong password", &digest));
    }

    #[test]
    fn test_roundtrip_empty_password() {
        let digest = hash_password("").unwrap();
        assert!(verify_password("", &digest));
        assert!(!verify_password(" ", &digest));
    }

    #[test]
    fn test_roundtrip_unicode_password() {
        let digest = hash_password("пароль-密码-🔐").unwrap();
        assert!(verify_password("пароль-密码-🔐", &digest));
        assert!(!verify_password("пароль-密码", &digest));
    }

    #[test]
    fn test_digest_is_salted() {
        let a = hash_password("password123").unwrap();
        let b = hash_password("password123").unwrap();
        // Fresh salt per hash: identical inputs produce distinct digests
        assert_ne!(a, b);
        assert!(verify_password("password123", &a));
        assert!(verify_password("password123", &b));
    }

    #[test]
    fn test_malformed_digest_is_false_not_panic() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", "$argon2id$garbage"));
    }

    #[test]
    fn test_tampered_digest_is_false() {
        let digest = hash_password("password123").unwrap();
        let mut tampered = digest.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert!(!verify_password("password123", &tampered));
    }
}
