use axum::{
    Router,
    handler::Handler,
    middleware,
    routing::{get, post},
};

use super::controller::{
    create_campaign, delete_campaign, get_campaign, list_campaigns, update_campaign,
};
use crate::middleware::role::{ADMIN_ONLY, MEMBER_ROLES, require_roles};
use crate::state::AppState;

/// Every route requires a member role; DELETE additionally requires admin.
pub fn init_campaigns_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_campaign).get(list_campaigns))
        .route(
            "/{id}",
            get(get_campaign)
                .put(update_campaign)
                .patch(update_campaign)
                .delete(delete_campaign.layer(middleware::from_fn_with_state(
                    ADMIN_ONLY,
                    require_roles,
                ))),
        )
        .route_layer(middleware::from_fn_with_state(MEMBER_ROLES, require_roles))
}
