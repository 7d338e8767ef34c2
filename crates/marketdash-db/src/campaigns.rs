use async_trait::async_trait;
use marketdash_core::Patch;
use marketdash_models::{Campaign, CampaignChanges, CampaignId, NewCampaign, UserId};
use sqlx::PgPool;
use tracing::instrument;

use crate::error::DbError;
use crate::repository::CampaignRepository;

#[derive(Clone)]
pub struct PgCampaignRepository {
    pool: PgPool,
}

impl PgCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    #[instrument(skip(self, campaign), fields(owner = %campaign.user_id))]
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, DbError> {
        let created = sqlx::query_as::<_, Campaign>(
            r#"INSERT INTO campaigns (user_id, title, description, status, start_date, end_date, budget)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id, user_id, title, description, status, start_date, end_date, budget,
                         created_at, updated_at"#,
        )
        .bind(campaign.user_id)
        .bind(&campaign.title)
        .bind(&campaign.description)
        .bind(campaign.status)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.budget)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn list_campaigns(
        &self,
        owner: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Campaign>, DbError> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            r#"SELECT id, user_id, title, description, status, start_date, end_date, budget,
                      created_at, updated_at
               FROM campaigns
               WHERE user_id = $1
               ORDER BY created_at ASC, id ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(campaigns)
    }

    #[instrument(skip(self))]
    async fn count_campaigns(&self, owner: UserId) -> Result<i64, DbError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM campaigns WHERE user_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    #[instrument(skip(self))]
    async fn get_campaign(&self, id: CampaignId, owner: UserId) -> Result<Campaign, DbError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"SELECT id, user_id, title, description, status, start_date, end_date, budget,
                      created_at, updated_at
               FROM campaigns
               WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(campaign)
    }

    #[instrument(skip(self, changes))]
    async fn update_campaign(
        &self,
        id: CampaignId,
        owner: UserId,
        changes: CampaignChanges,
    ) -> Result<Campaign, DbError> {
        let (set_description, description) = match changes.description {
            Patch::Missing => (false, None),
            Patch::Null => (true, None),
            Patch::Value(v) => (true, Some(v)),
        };

        let campaign = sqlx::query_as::<_, Campaign>(
            r#"UPDATE campaigns SET
                   title = COALESCE($3, title),
                   description = CASE WHEN $4 THEN $5 ELSE description END,
                   status = COALESCE($6, status),
                   start_date = COALESCE($7, start_date),
                   end_date = COALESCE($8, end_date),
                   budget = COALESCE($9, budget),
                   updated_at = NOW()
               WHERE id = $1 AND user_id = $2
               RETURNING id, user_id, title, description, status, start_date, end_date, budget,
                         created_at, updated_at"#,
        )
        .bind(id)
        .bind(owner)
        .bind(changes.title)
        .bind(set_description)
        .bind(description)
        .bind(changes.status)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.budget)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(campaign)
    }

    #[instrument(skip(self))]
    async fn delete_campaign(&self, id: CampaignId, owner: UserId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
