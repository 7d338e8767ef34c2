//! In-memory repositories for tests.
//!
//! Mirrors the PostgreSQL behaviour the services rely on: unique emails,
//! owner-scoped campaign access, creation-order listing and `NotFound` for
//! rows that are missing or owned by someone else.

use async_trait::async_trait;
use chrono::Utc;
use marketdash_core::Patch;
use marketdash_models::{
    Campaign, CampaignChanges, CampaignId, NewCampaign, NewUser, User, UserId, UserRole,
    UserWithPassword,
};
use std::sync::{Mutex, MutexGuard};

use crate::error::DbError;
use crate::repository::{CampaignRepository, UserRepository};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserWithPassword>>,
    campaigns: Mutex<Vec<Campaign>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_role(&self, email: &str, role: UserRole) -> Result<User, DbError> {
        let mut users = lock(&self.users);
        let row = users
            .iter_mut()
            .find(|u| u.user.email == email)
            .ok_or(DbError::NotFound)?;
        row.user.role = role;
        Ok(row.user.clone())
    }

    pub fn user_count(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn campaign_count(&self) -> usize {
        lock(&self.campaigns).len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.user.email == user.email) {
            return Err(DbError::UniqueViolation);
        }

        let created = User {
            id: UserId::new(),
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(UserWithPassword {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<UserWithPassword, DbError> {
        lock(&self.users)
            .iter()
            .find(|u| u.user.email == email)
            .cloned()
            .ok_or(DbError::NotFound)
    }
}

#[async_trait]
impl CampaignRepository for MemoryStore {
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, DbError> {
        let now = Utc::now();
        let created = Campaign {
            id: CampaignId::new(),
            user_id: campaign.user_id,
            title: campaign.title,
            description: campaign.description,
            status: campaign.status,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            budget: campaign.budget,
            created_at: now,
            updated_at: now,
        };
        lock(&self.campaigns).push(created.clone());
        Ok(created)
    }

    async fn list_campaigns(
        &self,
        owner: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Campaign>, DbError> {
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        Ok(lock(&self.campaigns)
            .iter()
            .filter(|c| c.user_id == owner)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count_campaigns(&self, owner: UserId) -> Result<i64, DbError> {
        let count = lock(&self.campaigns)
            .iter()
            .filter(|c| c.user_id == owner)
            .count();
        Ok(count as i64)
    }

    async fn get_campaign(&self, id: CampaignId, owner: UserId) -> Result<Campaign, DbError> {
        lock(&self.campaigns)
            .iter()
            .find(|c| c.id == id && c.user_id == owner)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        owner: UserId,
        changes: CampaignChanges,
    ) -> Result<Campaign, DbError> {
        let mut campaigns = lock(&self.campaigns);
        let row = campaigns
            .iter_mut()
            .find(|c| c.id == id && c.user_id == owner)
            .ok_or(DbError::NotFound)?;

        if let Some(title) = changes.title {
            row.title = title;
        }
        match changes.description {
            Patch::Missing => {}
            Patch::Null => row.description = None,
            Patch::Value(v) => row.description = Some(v),
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        if let Some(start) = changes.start_date {
            row.start_date = start;
        }
        if let Some(end) = changes.end_date {
            row.end_date = end;
        }
        if let Some(budget) = changes.budget {
            row.budget = budget;
        }
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete_campaign(&self, id: CampaignId, owner: UserId) -> Result<(), DbError> {
        let mut campaigns = lock(&self.campaigns);
        let before = campaigns.len();
        campaigns.retain(|c| !(c.id == id && c.user_id == owner));
        if campaigns.len() == before {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
