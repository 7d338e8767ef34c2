//! Campaign Service: owner-scoped CRUD.
//!
//! Every call takes the caller's id and passes it down to the query, so a
//! campaign owned by someone else is reported as `NotFound`, same as one
//! that does not exist. Role checks are not done here; the Role Gate in
//! front of the routes owns those.

use chrono::{DateTime, Utc};
use marketdash_core::{AppError, PaginationMeta, PaginationParams, pagination::page_offset};
use marketdash_db::{CampaignRepositoryState, DbError};
use marketdash_models::{
    Campaign, CampaignChanges, CampaignId, CreateCampaignDto, PaginatedCampaigns, UserId,
    campaigns::TITLE_MAX_LEN,
};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("{0}")]
    Validation(String),
    #[error("campaign not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

impl From<DbError> for CampaignError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => CampaignError::NotFound,
            other => CampaignError::Internal(other.into()),
        }
    }
}

impl From<CampaignError> for AppError {
    fn from(err: CampaignError) -> Self {
        match err {
            CampaignError::Validation(_) => AppError::bad_request(err),
            CampaignError::NotFound => AppError::not_found(err),
            CampaignError::Internal(e) => AppError::internal(e),
        }
    }
}

fn check_title(title: &str) -> Result<(), CampaignError> {
    let len = title.trim().chars().count() as u64;
    if len == 0 {
        return Err(CampaignError::Validation("title is required".into()));
    }
    if len > TITLE_MAX_LEN {
        return Err(CampaignError::Validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn check_budget(budget: f64) -> Result<(), CampaignError> {
    if budget.is_nan() || budget < 0.0 {
        return Err(CampaignError::Validation("budget must not be negative".into()));
    }
    Ok(())
}

fn check_dates(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), CampaignError> {
    if end < start {
        return Err(CampaignError::Validation(
            "end_date must not be before start_date".into(),
        ));
    }
    Ok(())
}

pub struct CampaignService {
    campaigns: CampaignRepositoryState,
}

impl CampaignService {
    pub fn new(campaigns: CampaignRepositoryState) -> Self {
        Self { campaigns }
    }

    #[instrument(skip(self, dto), fields(title = %dto.title))]
    pub async fn create(
        &self,
        owner: UserId,
        dto: CreateCampaignDto,
    ) -> Result<Campaign, CampaignError> {
        check_title(&dto.title)?;
        check_budget(dto.budget)?;
        check_dates(dto.start_date, dto.end_date)?;

        let campaign = self
            .campaigns
            .create_campaign(dto.into_new_campaign(owner))
            .await
            .map_err(|e| CampaignError::Internal(e.into()))?;

        tracing::info!(campaign_id = %campaign.id, "campaign created");
        Ok(campaign)
    }

    /// One page of the owner's campaigns, oldest first. A page past the end
    /// is empty.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        owner: UserId,
        page: i64,
        limit: i64,
    ) -> Result<Vec<Campaign>, CampaignError> {
        let limit = limit.max(0);
        let offset = page_offset(page, limit);
        Ok(self.campaigns.list_campaigns(owner, limit, offset).await?)
    }

    #[instrument(skip(self))]
    pub async fn count(&self, owner: UserId) -> Result<i64, CampaignError> {
        Ok(self.campaigns.count_campaigns(owner).await?)
    }

    /// [`Self::list`] plus totals, with page and limit clamped.
    #[instrument(skip(self))]
    pub async fn list_page(
        &self,
        owner: UserId,
        params: PaginationParams,
    ) -> Result<PaginatedCampaigns, CampaignError> {
        let data = self.list(owner, params.page(), params.limit()).await?;
        let total = self.count(owner).await?;
        Ok(PaginatedCampaigns {
            data,
            meta: PaginationMeta::new(&params, total),
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, owner: UserId, id: CampaignId) -> Result<Campaign, CampaignError> {
        Ok(self.campaigns.get_campaign(id, owner).await?)
    }

    /// Applies only the supplied fields. Dates are checked against the stored
    /// values when only one side of the range changes.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        owner: UserId,
        id: CampaignId,
        changes: CampaignChanges,
    ) -> Result<Campaign, CampaignError> {
        if let Some(title) = &changes.title {
            check_title(title)?;
        }
        if let Some(budget) = changes.budget {
            check_budget(budget)?;
        }

        if changes.is_empty() {
            return self.get(owner, id).await;
        }

        if changes.start_date.is_some() || changes.end_date.is_some() {
            let current = self.get(owner, id).await?;
            let merged = changes.apply_to(&current);
            check_dates(merged.start_date, merged.end_date)?;
        }

        let campaign = self.campaigns.update_campaign(id, owner, changes).await?;
        tracing::info!(campaign_id = %campaign.id, "campaign updated");
        Ok(campaign)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, owner: UserId, id: CampaignId) -> Result<(), CampaignError> {
        self.campaigns.delete_campaign(id, owner).await?;
        tracing::info!(campaign_id = %id, "campaign deleted");
        Ok(())
    }
}
