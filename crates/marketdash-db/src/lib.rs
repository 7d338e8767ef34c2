//! # marketdash DB
//!
//! Persistence layer for the marketdash API.
//!
//! - [`repository`]: the `UserRepository` / `CampaignRepository` contract
//! - [`users`], [`campaigns`]: PostgreSQL implementations over `sqlx::PgPool`
//! - [`pool`]: pool construction and embedded migrations
//! - `memory`: in-memory implementation (feature `test-utils`)

pub mod campaigns;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod pool;
pub mod repository;
pub mod users;

pub use campaigns::PgCampaignRepository;
pub use error::DbError;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use pool::{MIGRATOR, init_db_pool, run_migrations};
pub use repository::{
    CampaignRepository, CampaignRepositoryState, UserRepository, UserRepositoryState,
};
pub use users::PgUserRepository;
