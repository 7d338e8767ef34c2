//! Auth Gate.
//!
//! [`require_auth`] runs in front of every protected route:
//!
//! 1. no `Authorization` header: 401
//! 2. header is not exactly two whitespace-separated parts: 401
//! 3. first part is not `bearer` (any case): 401
//! 4. token fails verification: 401
//! 5. otherwise the verified claims are stored as an [`AuthContext`] in the
//!    request extensions and the request proceeds.
//!
//! Steps 2-4 share one response message; the specific reason is only logged.
//! Handlers get the caller through the [`AuthUser`] extractor, which turns the
//! stored claims into a typed [`Identity`].

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Extensions, HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use marketdash_auth::{Claims, INVALID_TOKEN_MESSAGE, Identity, IdentityError};
use marketdash_core::AppError;

use crate::state::AppState;

pub const MISSING_HEADER_MESSAGE: &str = "authorization header is not provided";

const BEARER: &str = "bearer";

/// Verified claims attached to a request by the Auth Gate.
#[derive(Debug, Clone)]
pub struct AuthContext {
    claims: Claims,
}

impl AuthContext {
    pub(crate) fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn identity(&self) -> Result<Identity, IdentityError> {
        Identity::try_from(&self.claims)
    }
}

/// Typed identity lookup. Never panics; a request that did not pass the Auth
/// Gate yields [`IdentityError::Missing`].
pub fn identity_from_extensions(extensions: &Extensions) -> Result<Identity, IdentityError> {
    extensions
        .get::<AuthContext>()
        .ok_or(IdentityError::Missing)?
        .identity()
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HeaderError {
    Missing,
    NotAscii,
    Malformed,
    UnsupportedScheme,
}

impl HeaderError {
    fn reason(&self) -> &'static str {
        match self {
            HeaderError::Missing => "missing_header",
            HeaderError::NotAscii => "non_ascii_header",
            HeaderError::Malformed => "malformed_header",
            HeaderError::UnsupportedScheme => "unsupported_scheme",
        }
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub(crate) fn parse_bearer(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(HeaderError::Missing)?;
    let value = value.to_str().map_err(|_| HeaderError::NotAscii)?;
    if value.trim().is_empty() {
        return Err(HeaderError::Missing);
    }

    let mut fields = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(HeaderError::Malformed);
    };

    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(HeaderError::UnsupportedScheme);
    }

    Ok(token)
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match parse_bearer(req.headers()) {
        Ok(token) => token,
        Err(HeaderError::Missing) => {
            tracing::warn!(reason = HeaderError::Missing.reason(), "authentication failed");
            return Err(AppError::unauthorized(MISSING_HEADER_MESSAGE));
        }
        Err(e) => {
            tracing::warn!(reason = e.reason(), "authentication failed");
            return Err(AppError::unauthorized(INVALID_TOKEN_MESSAGE));
        }
    };

    let claims = state.jwt.verify(token)?;
    req.extensions_mut().insert(AuthContext::new(claims));

    Ok(next.run(req).await)
}

/// Extractor for the authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthUser(identity_from_extensions(&parts.extensions)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_parse_bearer_accepts_any_case() {
        assert_eq!(parse_bearer(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(parse_bearer(&headers("bearer abc")), Ok("abc"));
        assert_eq!(parse_bearer(&headers("BEARER   abc")), Ok("abc"));
    }

    #[test]
    fn test_parse_bearer_state_machine() {
        assert_eq!(parse_bearer(&HeaderMap::new()), Err(HeaderError::Missing));
        assert_eq!(parse_bearer(&headers("   ")), Err(HeaderError::Missing));
        assert_eq!(parse_bearer(&headers("Bearer")), Err(HeaderError::Malformed));
        assert_eq!(parse_bearer(&headers("Bearer a b")), Err(HeaderError::Malformed));
        assert_eq!(
            parse_bearer(&headers("Basic dXNlcjpwYXNz")),
            Err(HeaderError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_identity_lookup_without_context() {
        assert_eq!(
            identity_from_extensions(&Extensions::new()),
            Err(IdentityError::Missing)
        );
    }

    #[test]
    fn test_identity_lookup_with_malformed_subject() {
        let mut extensions = Extensions::new();
        extensions.insert(AuthContext::new(Claims {
            sub: "not-a-uuid".into(),
            email: "a@b.io".into(),
            role: "user".into(),
            iat: 0,
            exp: 0,
        }));
        assert_eq!(
            identity_from_extensions(&extensions),
            Err(IdentityError::MalformedSubject)
        );
    }
}
