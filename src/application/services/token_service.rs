//! Stateless session tokens (HS256 JWT).

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Lifetime of a session token in seconds.
pub const SESSION_TTL_SECS: i64 = 3600;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies session tokens.
///
/// Expiry is checked here against an explicit clock with no leeway, so a token
/// stops being accepted exactly [`SESSION_TTL_SECS`] after it was issued.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a token for `user_id` valid from now.
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token for `user_id` as if the current time were `now`.
    pub fn issue_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + SESSION_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal(
                "Failed to issue session token",
                json!({ "reason": e.to_string() }),
            )
        })
    }

    /// Verifies a token and returns the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature is invalid, the token
    /// is malformed, or `now` is at or past its expiry.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i64, AppError> {
        let data =
            decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid token" }))
            })?;

        if now.timestamp() >= data.claims.exp {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Token expired" }),
            ));
        }

        data.claims.sub.parse::<i64>().map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid token subject" }))
        })
    }
}
