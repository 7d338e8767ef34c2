//! Token Service: HS256 access tokens.
//!
//! Tokens carry `{sub, email, role, iat, exp}` and are signed with the key
//! from [`JwtConfig`]. Verification pins the algorithm to HS256, so a token
//! signed with any other algorithm is rejected even if the key matches.
//! Expiry is checked with zero leeway.
//!
//! Every rejection surfaces as the same [`TokenError::Invalid`]. The precise
//! reason only goes to the log.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use marketdash_config::JwtConfig;
use marketdash_core::AppError;
use marketdash_models::{UserId, UserRole};
use thiserror::Error;

use crate::claims::Claims;

pub const INVALID_TOKEN_MESSAGE: &str = "access token is invalid or expired";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("token lifetime is out of range")]
    Lifetime,
    #[error("{INVALID_TOKEN_MESSAGE}")]
    Invalid,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encode(_) | TokenError::Lifetime => AppError::internal(err),
            TokenError::Invalid => AppError::unauthorized(INVALID_TOKEN_MESSAGE),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &Algorithm::HS256)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            token_ttl: config.token_ttl,
        }
    }

    /// Lifetime applied by callers that don't pick their own.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Signs a token valid from now until `now + ttl`. A negative `ttl`
    /// yields an already-expired token; one past chrono's range is
    /// [`TokenError::Lifetime`].
    pub fn issue(
        &self,
        subject: UserId,
        email: &str,
        role: UserRole,
        ttl: chrono::Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or(TokenError::Lifetime)?;
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!(reason = "expired", "token rejected")
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::warn!(reason = "bad_signature", "token rejected")
                    }
                    ErrorKind::InvalidAlgorithm => {
                        tracing::warn!(reason = "algorithm_mismatch", "token rejected")
                    }
                    ErrorKind::MissingRequiredClaim(claim) => {
                        tracing::warn!(reason = "missing_claim", claim = %claim, "token rejected")
                    }
                    other => tracing::debug!(reason = "malformed", kind = ?other, "token rejected"),
                }
                Err(TokenError::Invalid)
            }
        }
    }
}
