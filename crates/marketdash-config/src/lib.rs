//! # marketdash Config
//!
//! Configuration types for the marketdash API, loaded once from environment
//! variables at start-up and passed into constructors from there on.
//!
//! - [`server`]: bind address, environment, request timeout
//! - [`database`]: PostgreSQL connection pool settings
//! - [`jwt`]: token signing key and lifetime
//! - [`cors`]: allowed origins
//! - [`password`]: bcrypt work factor
//! - [`logging`]: log filter and optional log directory
//!
//! # Example
//!
//! ```ignore
//! use marketdash_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.address());
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod logging;
pub mod password;
pub mod server;
mod source;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use logging::LoggingConfig;
pub use password::PasswordConfig;
pub use server::{Environment, ServerConfig};
pub use source::parse_duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub password: PasswordConfig,
    pub logging: LoggingConfig,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(lookup)?,
            database: DatabaseConfig::from_lookup(lookup)?,
            jwt: JwtConfig::from_lookup(lookup)?,
            cors: CorsConfig::from_lookup(lookup),
            password: PasswordConfig::from_lookup(lookup)?,
            logging: LoggingConfig::from_lookup(lookup),
            run_migrations: source::bool_or(lookup, "RUN_MIGRATIONS", true)?,
        })
    }
}
