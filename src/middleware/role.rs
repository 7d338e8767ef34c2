//! Role Gate.
//!
//! [`require_roles`] is mounted with a static allow-list as its state:
//!
//! ```rust,ignore
//! router.route_layer(middleware::from_fn_with_state(MEMBER_ROLES, require_roles))
//! ```
//!
//! It must sit inside the Auth Gate. No identity on the request is a 401, a
//! role outside the list is a 403. Gates can be stacked; each one has to pass.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use marketdash_auth::Identity;
use marketdash_core::AppError;
use marketdash_models::UserRole;

use crate::middleware::auth::identity_from_extensions;

pub const FORBIDDEN_MESSAGE: &str = "you don't have permission to access this resource";

/// Any signed-in account.
pub const MEMBER_ROLES: &[UserRole] = &[UserRole::User, UserRole::Admin];

pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

pub fn check_any_role(identity: &Identity, allowed: &[UserRole]) -> Result<(), AppError> {
    if identity.has_role(allowed) {
        return Ok(());
    }

    tracing::warn!(
        user_id = %identity.user_id,
        role = %identity.role,
        allowed = ?allowed,
        "role check failed"
    );
    Err(AppError::forbidden(FORBIDDEN_MESSAGE))
}

pub async fn require_roles(
    State(allowed): State<&'static [UserRole]>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = identity_from_extensions(req.extensions())?;
    check_any_role(&identity, allowed)?;
    Ok(next.run(req).await)
}
