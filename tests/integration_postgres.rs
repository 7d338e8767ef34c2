//! Repository tests against a real PostgreSQL. Need `DATABASE_URL`:
//!
//! ```bash
//! cargo test --test integration_postgres -- --ignored
//! ```

use chrono::{Duration, TimeZone, Utc};
use marketdash::marketdash_core::Patch;
use marketdash::marketdash_db::{
    CampaignRepository, DbError, PgCampaignRepository, PgUserRepository, UserRepository,
};
use marketdash::marketdash_models::{
    CampaignChanges, CampaignStatus, NewCampaign, NewUser, User, UserId, UserRole,
};
use sqlx::PgPool;

async fn create_user(pool: &PgPool, email: &str) -> User {
    PgUserRepository::new(pool.clone())
        .create_user(NewUser {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$notarealhashnotarealhashnotarealhashnotarealhash".to_string(),
            role: UserRole::User,
        })
        .await
        .unwrap()
}

fn new_campaign(owner: UserId, title: &str) -> NewCampaign {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    NewCampaign {
        user_id: owner,
        title: title.to_string(),
        description: Some("desc".to_string()),
        status: CampaignStatus::Draft,
        start_date: start,
        end_date: start + Duration::days(30),
        budget: 1500.0,
    }
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_is_unique_violation(pool: PgPool) {
    create_user(&pool, "dup@example.com").await;

    let err = PgUserRepository::new(pool.clone())
        .create_user(NewUser {
            full_name: "Other".to_string(),
            email: "dup@example.com".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::User,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::UniqueViolation));
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_user_lookup_and_set_role(pool: PgPool) {
    let users = PgUserRepository::new(pool.clone());
    let created = create_user(&pool, "jane@example.com").await;

    let found = users.get_user_by_email("jane@example.com").await.unwrap();
    assert_eq!(found.user.id, created.id);

    let promoted = users
        .set_role("jane@example.com", UserRole::Admin)
        .await
        .unwrap();
    assert_eq!(promoted.role, UserRole::Admin);

    assert!(matches!(
        users.get_user_by_email("ghost@example.com").await,
        Err(DbError::NotFound)
    ));
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_campaign_crud_is_owner_scoped(pool: PgPool) {
    let campaigns = PgCampaignRepository::new(pool.clone());
    let owner = create_user(&pool, "owner@example.com").await;
    let stranger = create_user(&pool, "stranger@example.com").await;

    let created = campaigns
        .create_campaign(new_campaign(owner.id, "Spring launch"))
        .await
        .unwrap();
    assert_eq!(created.status, CampaignStatus::Draft);

    assert!(matches!(
        campaigns.get_campaign(created.id, stranger.id).await,
        Err(DbError::NotFound)
    ));
    assert!(matches!(
        campaigns.delete_campaign(created.id, stranger.id).await,
        Err(DbError::NotFound)
    ));

    let updated = campaigns
        .update_campaign(
            created.id,
            owner.id,
            CampaignChanges {
                budget: Some(99.5),
                description: Patch::Null,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.budget, 99.5);
    assert_eq!(updated.description, None);
    assert_eq!(updated.title, "Spring launch");
    assert!(updated.updated_at >= created.updated_at);

    campaigns.delete_campaign(created.id, owner.id).await.unwrap();
    assert!(matches!(
        campaigns.get_campaign(created.id, owner.id).await,
        Err(DbError::NotFound)
    ));
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_campaign_listing_order_and_count(pool: PgPool) {
    let campaigns = PgCampaignRepository::new(pool.clone());
    let owner = create_user(&pool, "owner@example.com").await;

    for i in 0..7 {
        campaigns
            .create_campaign(new_campaign(owner.id, &format!("Campaign {i}")))
            .await
            .unwrap();
    }

    let page = campaigns.list_campaigns(owner.id, 5, 5).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title, "Campaign 5");
    assert_eq!(campaigns.count_campaigns(owner.id).await.unwrap(), 7);
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_user_cascades(pool: PgPool) {
    let campaigns = PgCampaignRepository::new(pool.clone());
    let owner = create_user(&pool, "owner@example.com").await;
    campaigns
        .create_campaign(new_campaign(owner.id, "Doomed"))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(owner.id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(campaigns.count_campaigns(owner.id).await.unwrap(), 0);
}
