use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use marketdash_core::{AppError, PaginationParams};
use marketdash_models::{
    ApiResponse, Campaign, CampaignChanges, CampaignId, CreateCampaignDto, PaginatedCampaigns,
    UpdateCampaignDto,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

pub const INVALID_ID_MESSAGE: &str = "Invalid campaign ID format";

fn parse_campaign_id(raw: &str) -> Result<CampaignId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(anyhow!(INVALID_ID_MESSAGE)))
}

/// Create a campaign owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/campaigns",
    request_body = CreateCampaignDto,
    responses(
        (status = 201, description = "Campaign created", body = ApiResponse<Campaign>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Campaigns"
)]
#[instrument(skip(state, identity, dto), fields(user_id = %identity.user_id))]
pub async fn create_campaign(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCampaignDto>,
) -> Result<(StatusCode, Json<ApiResponse<Campaign>>), AppError> {
    let campaign = state.campaigns.create(identity.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Campaign created successfully", campaign)),
    ))
}

/// List the caller's campaigns, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/campaigns",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of campaigns", body = ApiResponse<PaginatedCampaigns>),
        (status = 400, description = "Invalid pagination parameters", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Campaigns"
)]
#[instrument(skip(state, identity, query), fields(user_id = %identity.user_id))]
pub async fn list_campaigns(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<ApiResponse<PaginatedCampaigns>>, AppError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "query rejected");
        AppError::bad_request(anyhow!("page and limit must be integers"))
    })?;

    let page = state.campaigns.list_page(identity.user_id, params).await?;
    Ok(Json(ApiResponse::success("Campaigns retrieved", page)))
}

/// Fetch one of the caller's campaigns
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}",
    params(("id" = String, Path, description = "Campaign ID (UUID)")),
    responses(
        (status = 200, description = "Campaign", body = ApiResponse<Campaign>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Not found or not owned by the caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Campaigns"
)]
#[instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn get_campaign(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Campaign>>, AppError> {
    let id = parse_campaign_id(&id)?;
    let campaign = state.campaigns.get(identity.user_id, id).await?;
    Ok(Json(ApiResponse::success("Campaign detail retrieved", campaign)))
}

/// Partially update one of the caller's campaigns (PUT and PATCH)
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/campaigns/{id}",
    params(("id" = String, Path, description = "Campaign ID (UUID)")),
    request_body = UpdateCampaignDto,
    responses(
        (status = 200, description = "Updated campaign", body = ApiResponse<Campaign>),
        (status = 400, description = "Malformed id or invalid fields", body = ErrorResponse),
        (status = 404, description = "Not found or not owned by the caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Campaigns"
)]
#[instrument(skip(state, identity, dto), fields(user_id = %identity.user_id))]
pub async fn update_campaign(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateCampaignDto>,
) -> Result<Json<ApiResponse<Campaign>>, AppError> {
    let id = parse_campaign_id(&id)?;
    let campaign = state
        .campaigns
        .update(identity.user_id, id, CampaignChanges::from(dto))
        .await?;
    Ok(Json(ApiResponse::success("Campaign updated successfully", campaign)))
}

/// Delete one of the caller's campaigns (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/campaigns/{id}",
    params(("id" = String, Path, description = "Campaign ID (UUID)")),
    responses(
        (status = 200, description = "Campaign deleted", body = ApiResponse<()>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Not found or not owned by the caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Campaigns"
)]
#[instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn delete_campaign(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_campaign_id(&id)?;
    state.campaigns.delete(identity.user_id, id).await?;
    Ok(Json(ApiResponse::message("Campaign deleted successfully")))
}
