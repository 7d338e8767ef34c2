//! Persistence contract consumed by the services.
//!
//! The traits are object safe so services can hold `Arc<dyn ...>` and tests
//! can swap in [`crate::MemoryStore`] or a hand-written double.

use async_trait::async_trait;
use marketdash_models::{
    Campaign, CampaignChanges, CampaignId, NewCampaign, NewUser, User, UserId, UserWithPassword,
};
use std::sync::Arc;

use crate::error::DbError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`DbError::UniqueViolation`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, DbError>;

    /// Fails with [`DbError::NotFound`] when no account has this email.
    async fn get_user_by_email(&self, email: &str) -> Result<UserWithPassword, DbError>;
}

/// Every method is scoped by owner: a campaign belonging to someone else
/// behaves exactly like one that does not exist.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, DbError>;

    /// Owner's campaigns in creation order.
    async fn list_campaigns(
        &self,
        owner: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Campaign>, DbError>;

    async fn count_campaigns(&self, owner: UserId) -> Result<i64, DbError>;

    async fn get_campaign(&self, id: CampaignId, owner: UserId) -> Result<Campaign, DbError>;

    async fn update_campaign(
        &self,
        id: CampaignId,
        owner: UserId,
        changes: CampaignChanges,
    ) -> Result<Campaign, DbError>;

    /// [`DbError::NotFound`] when nothing was deleted.
    async fn delete_campaign(&self, id: CampaignId, owner: UserId) -> Result<(), DbError>;
}

pub type UserRepositoryState = Arc<dyn UserRepository>;
pub type CampaignRepositoryState = Arc<dyn CampaignRepository>;
