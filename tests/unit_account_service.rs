mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use marketdash::marketdash_auth::{Identity, JwtService};
use marketdash::marketdash_core::AppError;
use marketdash::marketdash_db::{DbError, MemoryStore, UserRepository};
use marketdash::marketdash_models::{NewUser, User, UserRole, UserWithPassword};
use marketdash::modules::auth::{AccountError, AccountService};

fn service(store: Arc<MemoryStore>) -> AccountService {
    AccountService::new(
        store,
        Arc::new(JwtService::new(&common::jwt_config())),
        common::fast_hasher(),
    )
}

#[tokio::test]
async fn test_register_then_login() {
    let accounts = service(Arc::new(MemoryStore::new()));

    let user = accounts
        .register("Jane Doe", "jane@example.com", "s3cret-password")
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.email, "jane@example.com");

    let login = accounts
        .login("jane@example.com", "s3cret-password")
        .await
        .unwrap();
    assert_eq!(login.user.id, user.id);

    let jwt = JwtService::new(&common::jwt_config());
    let identity = Identity::try_from(&jwt.verify(&login.access_token).unwrap()).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.role, UserRole::User);
}

#[tokio::test]
async fn test_email_is_normalized() {
    let accounts = service(Arc::new(MemoryStore::new()));
    accounts
        .register("Jane", "  Jane@Example.COM ", "s3cret-password")
        .await
        .unwrap();

    assert!(accounts.login("jane@example.com", "s3cret-password").await.is_ok());
    assert!(accounts.get_by_email("JANE@example.com").await.is_ok());
}

#[tokio::test]
async fn test_duplicate_email_keeps_original() {
    let store = Arc::new(MemoryStore::new());
    let accounts = service(store.clone());

    let original = accounts
        .register("First", "dup@example.com", "first-password")
        .await
        .unwrap();
    let err = accounts
        .register("Second", "dup@example.com", "second-password")
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::AlreadyExists));
    assert_eq!(store.user_count(), 1);

    let stored = accounts.get_by_email("dup@example.com").await.unwrap();
    assert_eq!(stored.full_name, original.full_name);
    assert!(accounts.login("dup@example.com", "first-password").await.is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let accounts = service(Arc::new(MemoryStore::new()));
    accounts
        .register("Jane", "jane@example.com", "s3cret-password")
        .await
        .unwrap();

    let wrong_password = accounts
        .login("jane@example.com", "not-the-password")
        .await
        .unwrap_err();
    let unknown_email = accounts
        .login("nobody@example.com", "s3cret-password")
        .await
        .unwrap_err();

    let a = AppError::from(wrong_password);
    let b = AppError::from(unknown_email);
    assert_eq!(a.status, StatusCode::UNAUTHORIZED);
    assert_eq!(a.status, b.status);
    assert_eq!(a.public_message(), b.public_message());
}

#[tokio::test]
async fn test_get_by_email_unknown_is_not_found() {
    let accounts = service(Arc::new(MemoryStore::new()));
    let err = accounts.get_by_email("ghost@example.com").await.unwrap_err();
    assert!(matches!(err, AccountError::NotFound));
    assert_eq!(AppError::from(err).status, StatusCode::NOT_FOUND);
}

struct UnavailableUsers;

#[async_trait]
impl UserRepository for UnavailableUsers {
    async fn create_user(&self, _user: NewUser) -> Result<User, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn get_user_by_email(&self, _email: &str) -> Result<UserWithPassword, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn test_store_failures_are_internal() {
    let accounts = AccountService::new(
        Arc::new(UnavailableUsers),
        Arc::new(JwtService::new(&common::jwt_config())),
        common::fast_hasher(),
    );

    let err = accounts
        .register("Jane", "jane@example.com", "s3cret-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Internal(_)));

    let err = accounts
        .login("jane@example.com", "s3cret-password")
        .await
        .unwrap_err();
    let err = AppError::from(err);
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.public_message(), "Internal server error");
}
