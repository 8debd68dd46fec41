//! Authentication service.
//!
//! Issues and verifies signed session tokens (HS256 JWTs) and checks the
//! single admin credential at login. Sessions are stateless: the token is
//! the session, nothing is stored server-side.

mod error;

pub use error::AuthError;

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use secrecy::{ExposeSecret, SecretString};

use atelier_core::Role;

use crate::config::AdminCredentials;
use crate::models::SessionClaims;

/// Token codec bound to the configured signing secret and session TTL.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Build a token service from the signing secret and session TTL.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptySecret` for an empty secret. An empty
    /// signing key would make every signature trivially forgeable, so
    /// construction refuses rather than degrading.
    pub fn new(secret: &SecretString, ttl: Duration) -> Result<Self, AuthError> {
        let secret = secret.expose_secret();
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; clock skew between issuer and verifier is not
        // compensated.
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Session lifetime encoded into issued tokens.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed session token for `username` with `role`.
    ///
    /// The issue timestamp is captured once; the expiry is `iat + ttl`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Issue` if encoding fails.
    pub fn issue(&self, username: &str, role: Role) -> Result<(String, SessionClaims), AuthError> {
        let iat = chrono::Utc::now().timestamp();
        let exp = iat.saturating_add(i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX));

        let claims = SessionClaims {
            sub: username.to_owned(),
            role,
            iat,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(AuthError::Issue)?;

        Ok((token, claims))
    }

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Expired` if the validity window has passed,
    /// `AuthError::InvalidSignature` if the signature does not match
    /// (tampering or a different secret), and `AuthError::Malformed` for
    /// tokens that cannot be decoded at all.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|source| match source.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })
    }
}

/// Check a login attempt against the configured admin credential.
///
/// The login flow is deliberately thin: one identity, configured through the
/// environment, no credential database.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on any mismatch; callers get the
/// same error for a wrong username and a wrong password.
pub fn verify_credentials(
    admin: &AdminCredentials,
    username: &str,
    password: &str,
) -> Result<(), AuthError> {
    let username_ok = username == admin.username;
    let password_ok = password == admin.password.expose_secret();

    if username_ok && password_ok {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    fn secret() -> SecretString {
        SecretString::from("kU4mB7zQ1xW9eR2tY6pL8aD3fG5hJ0sN")
    }

    fn service() -> TokenService {
        TokenService::new(&secret(), TTL).unwrap()
    }

    #[test]
    fn test_empty_secret_fails_closed() {
        let result = TokenService::new(&SecretString::from(""), TTL);
        assert!(matches!(result, Err(AuthError::EmptySecret)));
    }

    #[test]
    fn test_issue_then_verify_roundtrips_claims() {
        let tokens = service();
        let (token, issued) = tokens.issue("ada", Role::Admin).unwrap();

        let verified = tokens.verify(&token).unwrap();
        assert_eq!(verified, issued);
        assert_eq!(verified.username(), "ada");
        assert_eq!(verified.exp - verified.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service();

        // Encode a claim whose window closed a second ago, with the same key.
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "ada".to_string(),
            role: Role::Admin,
            iat: now - 3600,
            exp: now - 1,
        };
        let stale = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret().expose_secret().as_bytes()),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&stale), Err(AuthError::Expired)));
    }

    #[test]
    fn test_token_valid_until_the_last_second() {
        let tokens = service();

        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "ada".to_string(),
            role: Role::Admin,
            iat: now - 10,
            exp: now + 1,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret().expose_secret().as_bytes()),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let tokens = service();
        let (token, _) = tokens.issue("ada", Role::Admin).unwrap();

        // Flip one character of the signature segment.
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = tokens.verify(&tampered);
        assert!(matches!(
            result,
            Err(AuthError::InvalidSignature | AuthError::Malformed)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = service().issue("ada", Role::Admin).unwrap();

        let other = TokenService::new(
            &SecretString::from("zX8cV2bN6mQ4wE0rT9yU3iO7pA5sD1fG"),
            TTL,
        )
        .unwrap();

        assert!(matches!(
            other.verify(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert!(matches!(
            service().verify("not-a-token"),
            Err(AuthError::Malformed)
        ));
    }

    #[test]
    fn test_verify_credentials() {
        let admin = AdminCredentials {
            username: "ada".to_string(),
            password: SecretString::from("hunter2hunter2"),
        };

        assert!(verify_credentials(&admin, "ada", "hunter2hunter2").is_ok());
        assert!(matches!(
            verify_credentials(&admin, "ada", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            verify_credentials(&admin, "eve", "hunter2hunter2"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
