//! Stateless session tokens.
//!
//! Tokens are self-contained HS256-signed assertions carrying the subject's
//! user ID and an absolute expiry instant. Verification is purely
//! cryptographic - no store lookup, no suspension - which also means a
//! token cannot be revoked before its natural expiry. Compromised-token
//! mitigation (a revocation list) is a known gap of this design; rotating
//! the signing secret invalidates every outstanding token and requires a
//! restart.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use cartify_core::UserId;

/// Errors from issuing or verifying tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Malformed structure, bad signature, expired, or unparseable subject.
    /// Collapsed to a single variant so callers cannot leak which check
    /// failed.
    #[error("invalid or expired token")]
    Invalid,

    /// Token could not be signed (never caused by client input).
    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user ID, as a string.
    sub: String,
    /// Expiry, seconds since the Unix epoch.
    exp: i64,
}

/// Issues and verifies session tokens.
///
/// Built once at startup from the configured signing secret; read-only
/// afterwards.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the signing secret and default lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the default 60s leeway would accept tokens past
        // their advertised instant.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a token for a subject using the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, subject: UserId) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    /// Issue a token for a subject with an explicit lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue_with_ttl(&self, subject: UserId, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` on malformed structure, signature
    /// mismatch, expiry, or an unparseable subject.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
                tracing::debug!("token rejected: {e}");
                TokenError::Invalid
            })?;

        data.claims
            .sub
            .parse::<i32>()
            .map(UserId::new)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        let secret = SecretString::from("kD8#mQ2$vN5@wR9!xT4&zB7*cF1^hJ6%");
        TokenService::new(&secret, Duration::hours(12))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue(UserId::new(42)).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), UserId::new(42));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let token = tokens
            .issue_with_ttl(UserId::new(1), Duration::seconds(-5))
            .unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let tokens = service();
        // One second of validity left - still accepted.
        let token = tokens
            .issue_with_ttl(UserId::new(1), Duration::seconds(1))
            .unwrap();
        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = service();
        assert!(matches!(tokens.verify(""), Err(TokenError::Invalid)));
        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(
            tokens.verify("a.b.c"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let tokens = service();
        let token = tokens.issue(UserId::new(7)).unwrap();
        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert!(matches!(tokens.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let tokens = service();
        let other = TokenService::new(
            &SecretString::from("qW3#eR5$tY7@uI9!oP2&aS4*dF6^gH8%"),
            Duration::hours(12),
        );
        let token = tokens.issue(UserId::new(7)).unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }
}
