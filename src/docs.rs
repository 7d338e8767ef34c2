use marketdash_core::{PaginationMeta, PaginationParams};
use marketdash_models::{
    Campaign, CampaignId, CampaignStatus, CreateCampaignDto, LoginRequest, LoginResponse,
    PaginatedCampaigns, RegisterRequest, UpdateCampaignDto, User, UserId, UserRole,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::ping,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_me,
        crate::modules::campaigns::controller::create_campaign,
        crate::modules::campaigns::controller::list_campaigns,
        crate::modules::campaigns::controller::get_campaign,
        crate::modules::campaigns::controller::update_campaign,
        crate::modules::campaigns::controller::delete_campaign,
    ),
    components(
        schemas(
            User,
            UserId,
            UserRole,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Campaign,
            CampaignId,
            CampaignStatus,
            CreateCampaignDto,
            UpdateCampaignDto,
            PaginatedCampaigns,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "The signed-in account"),
        (name = "Campaigns", description = "Marketing campaigns owned by the caller")
    ),
    info(
        title = "marketdash API",
        version = "0.1.0",
        description = "Marketing campaign dashboard backend built with Axum and PostgreSQL, using JWT bearer authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
