use std::sync::Arc;
use std::time::Duration;

use marketdash_auth::JwtService;
use marketdash_config::{AppConfig, CorsConfig, JwtConfig};
use marketdash_core::PasswordHasher;
use marketdash_db::{
    CampaignRepositoryState, PgCampaignRepository, PgUserRepository, UserRepositoryState,
};
use sqlx::PgPool;

use crate::modules::auth::AccountService;
use crate::modules::campaigns::CampaignService;

/// Shared, read-only application state. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub campaigns: Arc<CampaignService>,
    pub jwt: Arc<JwtService>,
    pub cors_config: CorsConfig,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        users: UserRepositoryState,
        campaigns: CampaignRepositoryState,
        jwt_config: &JwtConfig,
        hasher: PasswordHasher,
        cors_config: CorsConfig,
        request_timeout: Duration,
    ) -> Self {
        let jwt = Arc::new(JwtService::new(jwt_config));
        Self {
            accounts: Arc::new(AccountService::new(users, jwt.clone(), hasher)),
            campaigns: Arc::new(CampaignService::new(campaigns)),
            jwt,
            cors_config,
            request_timeout,
        }
    }
}

/// Wires the PostgreSQL repositories into the services.
pub fn init_app_state(pool: PgPool, config: &AppConfig) -> AppState {
    AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgCampaignRepository::new(pool)),
        &config.jwt,
        PasswordHasher::new(config.password.bcrypt_cost),
        config.cors.clone(),
        config.server.request_timeout,
    )
}
