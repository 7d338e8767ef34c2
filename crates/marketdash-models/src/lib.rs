//! # marketdash Models
//!
//! Domain records and request/response DTOs shared by the API, the
//! persistence layer and the CLI.
//!
//! - [`ids`]: `UserId` and `CampaignId` newtypes
//! - [`users`]: accounts, roles, register/login DTOs
//! - [`campaigns`]: campaigns, statuses, create/update DTOs
//! - [`response`]: the `{message, data?, error?}` envelope

pub mod campaigns;
pub mod ids;
pub mod response;
pub mod users;

pub use campaigns::{
    Campaign, CampaignChanges, CampaignStatus, CreateCampaignDto, NewCampaign,
    PaginatedCampaigns, UpdateCampaignDto,
};
pub use ids::{CampaignId, UserId};
pub use response::ApiResponse;
pub use users::{
    LoginRequest, LoginResponse, NewUser, RegisterRequest, User, UserRole, UserWithPassword,
    normalize_email,
};
