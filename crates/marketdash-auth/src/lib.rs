//! # marketdash Auth
//!
//! Token Service and identity types for the marketdash API.
//!
//! - [`claims`]: the claim set embedded in access tokens
//! - [`jwt`]: [`JwtService`] issuing and verifying HS256 tokens
//! - [`identity`]: [`Identity`], the typed view of verified claims
//!
//! # Example
//!
//! ```ignore
//! use marketdash_auth::{Identity, JwtService};
//!
//! let jwt = JwtService::new(&config.jwt);
//! let token = jwt.issue(user.id, &user.email, user.role, chrono::Duration::hours(24))?;
//! let identity = Identity::try_from(&jwt.verify(&token)?)?;
//! ```

pub mod claims;
pub mod identity;
pub mod jwt;

pub use claims::Claims;
pub use identity::{Identity, IdentityError};
pub use jwt::{INVALID_TOKEN_MESSAGE, JwtService, TokenError};
