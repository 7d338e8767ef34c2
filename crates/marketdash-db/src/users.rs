use async_trait::async_trait;
use marketdash_models::{NewUser, User, UserRole, UserWithPassword};
use sqlx::PgPool;
use tracing::instrument;

use crate::error::DbError;
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Changes the role of an existing account. Used by the admin CLI.
    #[instrument(skip(self))]
    pub async fn set_role(&self, email: &str, role: UserRole) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users SET role = $2, updated_at = NOW()
               WHERE email = $1
               RETURNING id, full_name, email, role, created_at"#,
        )
        .bind(email)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(user)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (full_name, email, password_hash, role)
               VALUES ($1, $2, $3, $4)
               RETURNING id, full_name, email, role, created_at"#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_user_by_email(&self, email: &str) -> Result<UserWithPassword, DbError> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            r#"SELECT id, full_name, email, role, created_at, password_hash
               FROM users
               WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(user)
    }
}
