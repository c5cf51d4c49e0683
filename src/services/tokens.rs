//! Session tokens
//!
//! A session token is an HS256 JWT carrying the user ID in a `userId` claim and
//! expiring seven days after issue. There is no server-side revocation: expiry
//! is the only way a token stops being valid.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::auth::{AuthConfig, AuthError};

/// Lifetime of an issued session token
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (principal)
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// Issues and verifies session tokens with the configured secret
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
            }),
        }
    }

    /// Issue a token for a user, valid for [`TOKEN_LIFETIME_DAYS`] from now
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = SessionClaims {
            user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)?)
    }

    /// Verify a token and return the user ID it asserts.
    ///
    /// Every failure (bad signature, expired, malformed) yields `None`; the
    /// reason is only logged.
    pub fn verify(&self, token: &str) -> Option<i64> {
        match decode::<SessionClaims>(token, &self.keys.decoding, &self.keys.validation) {
            Ok(data) => Some(data.claims.user_id),
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                None
            }
        }
    }
}
