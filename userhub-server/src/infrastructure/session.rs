use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("session encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("session decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

/// Identity carried by the session cookie.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionClaims {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) exp: i64,
}

/// Signs and verifies the session cookie value (HS256). Every issued token
/// expires `ttl_seconds` after issuing, so re-issuing slides the expiry.
pub(crate) struct SessionService {
    secret: String,
    ttl_seconds: i64,
    secure_cookie: bool,
}

impl SessionService {
    pub(crate) const COOKIE_NAME: &'static str = "session";
    const DEFAULT_TTL_SECONDS: i64 = 14 * 24 * 60 * 60;

    pub(crate) fn new(secret: &str, ttl_seconds: i64, secure_cookie: bool) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        SessionService {
            secret: secret.into(),
            ttl_seconds,
            secure_cookie,
        }
    }

    pub(crate) fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub(crate) fn secure_cookie(&self) -> bool {
        self.secure_cookie
    }

    pub(crate) fn issue(&self, user_id: i64, username: &str) -> Result<String, SessionError> {
        let exp = (Utc::now() + Duration::seconds(self.ttl_seconds)).timestamp();
        self.encode_claims(&SessionClaims {
            user_id,
            username: username.into(),
            exp,
        })
    }

    pub(crate) fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(SessionError::Decode)?;

        Ok(token_data.claims)
    }

    fn encode_claims(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(SessionError::Encode)
    }
}
