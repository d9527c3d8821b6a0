//! Signed identity tokens.
//!
//! HS256 JWTs carrying only `{ email, exp }`. No issuer or audience checks and
//! no server-side state: a token is good until its signature or expiry says
//! otherwise, and issuing a new one never invalidates an old one.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("JWT lifetime of {0} hours is out of range")]
    InvalidLifetime(u64),

    #[error("JWT generation error: {0}")]
    Generation(String),

    /// Bad signature, malformed token, missing or mistyped claims, or expired.
    /// The specific cause is logged, not returned.
    #[error("Invalid token")]
    InvalidToken,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Self::lifetime(ttl_hours)?,
        })
    }

    /// `ttl_hours` as a duration that still yields a representable expiry
    fn lifetime(ttl_hours: u64) -> Result<Duration, TokenError> {
        i64::try_from(ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(TokenError::InvalidLifetime(ttl_hours))
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Sign a token for `email` that expires one TTL from now
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Generation("expiry is past the maximum date".to_string()))?;
        let claims = Claims {
            email: email.to_string(),
            exp: expires_at.timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Check signature and expiry, returning the subject email
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims.email),
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Rejected expired token"),
                    ErrorKind::InvalidSignature => tracing::debug!("Rejected token with bad signature"),
                    kind => tracing::debug!("Rejected token: {:?}", kind),
                }
                Err(TokenError::InvalidToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 24).unwrap()
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        assert!(matches!(TokenService::new("", 24), Err(TokenError::MissingSecret)));
    }

    #[test]
    fn oversized_lifetime_is_a_configuration_error() {
        for hours in [u64::MAX, u64::MAX / 2, i64::MAX as u64, 10_000_000_000] {
            assert!(matches!(
                TokenService::new("s", hours),
                Err(TokenError::InvalidLifetime(h)) if h == hours
            ));
        }
        assert!(TokenService::new("s", 24 * 365 * 100).is_ok());
    }

    #[test]
    fn expiry_past_the_calendar_fails_instead_of_panicking() {
        let tokens = TokenService {
            ttl: Duration::try_days(100_000_000).unwrap(),
            ..service()
        };
        assert!(matches!(tokens.issue("ann@x.com"), Err(TokenError::Generation(_))));
    }

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let tokens = service();
        let token = tokens.issue("ann@x.com").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "ann@x.com");
    }

    #[test]
    fn reissuing_keeps_older_tokens_valid() {
        let tokens = service();
        let first = tokens.issue("ann@x.com").unwrap();
        let _second = tokens.issue("ann@x.com").unwrap();
        assert_eq!(tokens.verify(&first).unwrap(), "ann@x.com");
    }

    #[test]
    fn token_older_than_a_day_is_rejected() {
        let tokens = service();
        // issued 25 hours ago with the standard 24 hour lifetime
        let claims = Claims {
            email: "ann@x.com".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let token = tokens.sign(&claims).unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn expiry_is_one_ttl_from_now() {
        let tokens = service();
        let token = tokens.issue("ann@x.com").unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        let data = decode::<Claims>(&token, &DecodingKey::from_secret(b"test-secret"), &validation).unwrap();
        let expected = (Utc::now() + Duration::hours(24)).timestamp();
        assert!((data.claims.exp - expected).abs() <= 5);
    }

    #[test]
    fn other_secret_fails_verification() {
        let token = TokenService::new("other-secret", 24).unwrap().issue("ann@x.com").unwrap();
        assert!(matches!(service().verify(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = service();
        assert!(tokens.verify("").is_err());
        assert!(tokens.verify("abc123").is_err());
        assert!(tokens.verify("a.b.c").is_err());
    }

    #[test]
    fn missing_or_mistyped_email_claim_is_rejected() {
        #[derive(Serialize)]
        struct NoEmail {
            exp: i64,
        }
        #[derive(Serialize)]
        struct NumericEmail {
            email: i64,
            exp: i64,
        }

        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let key = EncodingKey::from_secret(b"test-secret");
        let header = Header::new(Algorithm::HS256);

        let no_email = encode(&header, &NoEmail { exp }, &key).unwrap();
        let numeric = encode(&header, &NumericEmail { email: 42, exp }, &key).unwrap();

        assert!(matches!(service().verify(&no_email), Err(TokenError::InvalidToken)));
        assert!(matches!(service().verify(&numeric), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn missing_expiry_is_rejected() {
        #[derive(Serialize)]
        struct NoExpiry {
            email: String,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry { email: "ann@x.com".to_string() },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(service().verify(&token), Err(TokenError::InvalidToken)));
    }
}
