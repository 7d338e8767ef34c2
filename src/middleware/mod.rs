//! Request middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: the Auth Gate (`require_auth`) and the `AuthUser` extractor
//! - [`role`]: the Role Gate (`require_roles`) and the role allow-lists
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token and stores the claims on the request
//! 3. `require_roles` checks the caller's role against the route's allow-list
//! 4. The handler reads the caller through `AuthUser`

pub mod auth;
pub mod role;
