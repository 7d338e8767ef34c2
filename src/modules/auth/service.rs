//! Account Service: registration, login and account lookup.
//!
//! bcrypt runs on the blocking pool. Login always pays for one bcrypt
//! verification, against a throwaway digest when the email is unknown, so an
//! unknown email and a wrong password look the same from the outside.

use std::sync::Arc;

use marketdash_auth::JwtService;
use marketdash_core::{AppError, PasswordHasher};
use marketdash_db::{DbError, UserRepositoryState};
use marketdash_models::{LoginResponse, NewUser, User, UserRole, normalize_email};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("email already exists")]
    AlreadyExists,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

impl AccountError {
    fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        AccountError::Internal(err.into())
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::AlreadyExists => AppError::conflict(err),
            AccountError::InvalidCredentials => AppError::unauthorized(err.to_string()),
            AccountError::NotFound => AppError::not_found(err),
            AccountError::Internal(e) => AppError::internal(e),
        }
    }
}

pub struct AccountService {
    users: UserRepositoryState,
    tokens: Arc<JwtService>,
    hasher: PasswordHasher,
    dummy_digest: OnceCell<String>,
}

impl AccountService {
    pub fn new(users: UserRepositoryState, tokens: Arc<JwtService>, hasher: PasswordHasher) -> Self {
        Self {
            users,
            tokens,
            hasher,
            dummy_digest: OnceCell::new(),
        }
    }

    async fn hash(&self, password: &str) -> Result<String, AccountError> {
        let hasher = self.hasher;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(AccountError::internal)?
            .map_err(AccountError::internal)
    }

    async fn verify(&self, password: &str, digest: &str) -> Result<bool, AccountError> {
        let hasher = self.hasher;
        let password = password.to_owned();
        let digest = digest.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(AccountError::internal)
    }

    async fn dummy_digest(&self) -> Result<&str, AccountError> {
        let digest = self
            .dummy_digest
            .get_or_try_init(|| self.hash("marketdash-timing-equalizer"))
            .await?;
        Ok(digest.as_str())
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        let password_hash = self.hash(password).await?;

        let new_user = NewUser {
            full_name: full_name.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            role: UserRole::User,
        };

        match self.users.create_user(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "account registered");
                Ok(user)
            }
            Err(DbError::UniqueViolation) => Err(AccountError::AlreadyExists),
            Err(e) => Err(AccountError::internal(e)),
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AccountError> {
        let email = normalize_email(email);

        let record = match self.users.get_user_by_email(&email).await {
            Ok(record) => record,
            Err(DbError::NotFound) => {
                let digest = self.dummy_digest().await?;
                self.verify(password, digest).await?;
                tracing::info!(reason = "unknown_email", "login rejected");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(AccountError::internal(e)),
        };

        if !self.verify(password, &record.password_hash).await? {
            tracing::info!(reason = "wrong_password", "login rejected");
            return Err(AccountError::InvalidCredentials);
        }

        let user = record.user;
        let ttl = chrono::Duration::from_std(self.tokens.token_ttl()).map_err(AccountError::internal)?;
        let access_token = self
            .tokens
            .issue(user.id, &user.email, user.role, ttl)
            .map_err(AccountError::internal)?;

        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(LoginResponse { access_token, user })
    }

    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<User, AccountError> {
        match self.users.get_user_by_email(&normalize_email(email)).await {
            Ok(record) => Ok(record.user),
            Err(DbError::NotFound) => Err(AccountError::NotFound),
            Err(e) => Err(AccountError::internal(e)),
        }
    }
}
