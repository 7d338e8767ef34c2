//! Typed identity recovered from verified claims.
//!
//! The Auth Gate stores this in the request extensions; handlers and the Role
//! Gate read it back from there. Conversion from [`Claims`] never panics: a
//! subject that is not a UUID, an empty email or an unknown role is an
//! [`IdentityError`].

use marketdash_core::AppError;
use marketdash_models::{UserId, UserRole};
use thiserror::Error;

use crate::claims::Claims;
use crate::jwt::INVALID_TOKEN_MESSAGE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("no authenticated identity on the request")]
    Missing,
    #[error("subject claim is not a valid user id")]
    MalformedSubject,
    #[error("email claim is empty")]
    MissingEmail,
    #[error("role claim {0:?} is not a known role")]
    UnknownRole(String),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        tracing::warn!(reason = %err, "identity lookup failed");
        AppError::unauthorized(INVALID_TOKEN_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl TryFrom<&Claims> for Identity {
    type Error = IdentityError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| IdentityError::MalformedSubject)?;

        if claims.email.trim().is_empty() {
            return Err(IdentityError::MissingEmail);
        }

        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|e| IdentityError::UnknownRole(e.0))?;

        Ok(Self {
            user_id,
            email: claims.email.clone(),
            role,
        })
    }
}

impl Identity {
    pub fn has_role(&self, allowed: &[UserRole]) -> bool {
        allowed.contains(&self.role)
    }
}
