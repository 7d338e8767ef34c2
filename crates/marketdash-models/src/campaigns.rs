//! Campaign domain models and DTOs.

use crate::ids::{CampaignId, UserId};
use chrono::{DateTime, Utc};
use marketdash_core::{PaginationMeta, Patch};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

pub const TITLE_MAX_LEN: u64 = 255;

/// Lifecycle status of a campaign. Stored as the PostgreSQL enum `campaign_status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campaign_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            other => Err(format!("unknown campaign status {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Campaign {
    pub id: CampaignId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the campaigns table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampaign {
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: f64,
}

/// Column-level changes for an update. `None` leaves a column untouched;
/// `description` can additionally be cleared with [`Patch::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignChanges {
    pub title: Option<String>,
    pub description: Patch<String>,
    pub status: Option<CampaignStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub budget: Option<f64>,
}

impl CampaignChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_missing()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.budget.is_none()
    }

    /// The campaign as it would look after these changes.
    pub fn apply_to(&self, campaign: &Campaign) -> Campaign {
        let mut next = campaign.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        match &self.description {
            Patch::Missing => {}
            Patch::Null => next.description = None,
            Patch::Value(v) => next.description = Some(v.clone()),
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(start) = self.start_date {
            next.start_date = start;
        }
        if let Some(end) = self.end_date {
            next.end_date = end;
        }
        if let Some(budget) = self.budget {
            next.budget = budget;
        }
        next
    }
}

fn validate_date_range(dto: &CreateCampaignDto) -> Result<(), ValidationError> {
    if dto.end_date < dto.start_date {
        return Err(ValidationError::new("date_range")
            .with_message("end_date must not be before start_date".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_date_range", skip_on_field_errors = false))]
pub struct CreateCampaignDto {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Spring launch")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    #[schema(example = 1500.0)]
    pub budget: f64,
}

impl CreateCampaignDto {
    pub fn into_new_campaign(self, owner: UserId) -> NewCampaign {
        NewCampaign {
            user_id: owner,
            title: self.title,
            description: self.description,
            status: CampaignStatus::default(),
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
        }
    }
}

/// Partial update body. An absent key leaves the column alone, `null` is only
/// accepted for `description`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCampaignDto {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<CampaignStatus>)]
    pub status: Patch<CampaignStatus>,
    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub start_date: Patch<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub end_date: Patch<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub budget: Patch<f64>,
}

fn reject_null<T>(errors: &mut ValidationErrors, field: &'static str, value: &Patch<T>) {
    if value.is_null() {
        errors.add(
            field,
            ValidationError::new("null").with_message("must not be null".into()),
        );
    }
}

impl Validate for UpdateCampaignDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        reject_null(&mut errors, "title", &self.title);
        reject_null(&mut errors, "status", &self.status);
        reject_null(&mut errors, "start_date", &self.start_date);
        reject_null(&mut errors, "end_date", &self.end_date);
        reject_null(&mut errors, "budget", &self.budget);

        if let Patch::Value(title) = &self.title {
            let len = title.chars().count() as u64;
            if len == 0 || len > TITLE_MAX_LEN {
                errors.add(
                    "title",
                    ValidationError::new("length")
                        .with_message("must be between 1 and 255 characters".into()),
                );
            }
        }

        if let Patch::Value(budget) = &self.budget
            && (budget.is_nan() || *budget < 0.0)
        {
            errors.add(
                "budget",
                ValidationError::new("range").with_message("must not be negative".into()),
            );
        }

        if let (Patch::Value(start), Patch::Value(end)) = (&self.start_date, &self.end_date)
            && end < start
        {
            errors.add(
                "end_date",
                ValidationError::new("date_range")
                    .with_message("end_date must not be before start_date".into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<UpdateCampaignDto> for CampaignChanges {
    fn from(dto: UpdateCampaignDto) -> Self {
        Self {
            title: dto.title.into_option(),
            description: dto.description,
            status: dto.status.into_option(),
            start_date: dto.start_date.into_option(),
            end_date: dto.end_date.into_option(),
            budget: dto.budget.into_option(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCampaigns {
    pub data: Vec<Campaign>,
    pub meta: PaginationMeta,
}
