//! Integration tests for basic entity CRUD across the repository layer.

use learnhub_db::models::otp;
use learnhub_db::models::pricing::UpsertRegionalPricing;
use learnhub_db::models::product::{CreateProduct, UpdateProduct};
use learnhub_db::models::user::{CreateUser, UpdateUser};
use learnhub_db::repositories::{OtpRepo, PricingRepo, ProductRepo, UserRepo, VideoRepo};
use sqlx::PgPool;

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.into(),
        name: "Test".into(),
        password_hash: "phc$hash".into(),
        role: "user".into(),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_user(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap();

    let by_id = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "a@example.com");
    assert!(!by_id.is_verified);

    let by_email = UserRepo::find_by_email(&pool, "a@example.com").await.unwrap();
    assert!(by_email.is_some());
    assert!(UserRepo::find_by_email(&pool, "b@example.com").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap();
    let err = UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_update_and_stats(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap();
    UserRepo::create(&pool, &new_user("b@example.com")).await.unwrap();

    UserRepo::mark_verified(&pool, "a@example.com").await.unwrap();
    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            name: None,
            role: Some("admin".into()),
            is_verified: None,
            blocked: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    let stats = UserRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.verified, 1);
    assert_eq!(stats.admins, 1);
    assert_eq!(stats.blocked, 0);
}

// ---------------------------------------------------------------------------
// OTPs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn latest_valid_otp_flow(pool: PgPool) {
    let email = "a@example.com";

    OtpRepo::create(&pool, email, "111111", otp::PURPOSE_REGISTRATION, 15).await.unwrap();
    let newer = OtpRepo::create(&pool, email, "222222", otp::PURPOSE_REGISTRATION, 15)
        .await
        .unwrap();

    let found = OtpRepo::find_latest_valid(&pool, email, otp::PURPOSE_REGISTRATION)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, newer.id);
    assert_eq!(found.code, "222222");

    // Consumed codes stop matching.
    OtpRepo::mark_used(&pool, newer.id).await.unwrap();
    let found = OtpRepo::find_latest_valid(&pool, email, otp::PURPOSE_REGISTRATION)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.code, "111111");

    // Purpose is part of the key.
    assert!(OtpRepo::find_latest_valid(&pool, email, otp::PURPOSE_RESET)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_otps_never_match_and_can_be_purged(pool: PgPool) {
    let email = "a@example.com";
    // ttl of zero minutes expires immediately.
    OtpRepo::create(&pool, email, "111111", otp::PURPOSE_RESET, 0).await.unwrap();

    assert!(OtpRepo::find_latest_valid(&pool, email, otp::PURPOSE_RESET)
        .await
        .unwrap()
        .is_none());

    let purged = OtpRepo::delete_expired(&pool).await.unwrap();
    assert_eq!(purged, 1);
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_crud_roundtrip(pool: PgPool) {
    let created = ProductRepo::create(
        &pool,
        &CreateProduct {
            product_id: "prod_123".into(),
            price_id: "price_123".into(),
            interval: "monthly".into(),
            currency: "usd".into(),
            price: 1999,
            original_price: 2999,
            kind: "subscription".into(),
            trial_days: 7,
            is_active: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(created.interval, "monthly");

    let updated = ProductRepo::update(
        &pool,
        created.id,
        &UpdateProduct {
            price_id: None,
            interval: Some("yearly".into()),
            currency: None,
            price: None,
            original_price: None,
            kind: None,
            trial_days: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.interval, "yearly");
    assert_eq!(updated.price, 1999);

    ProductRepo::set_active(&pool, created.id, false).await.unwrap();
    assert!(ProductRepo::list(&pool, true).await.unwrap().is_empty());
    assert_eq!(ProductRepo::list(&pool, false).await.unwrap().len(), 1);

    assert!(ProductRepo::delete(&pool, created.id).await.unwrap());
    assert!(ProductRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Regional pricing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn pricing_upsert_overwrites_existing_region(pool: PgPool) {
    let input = UpsertRegionalPricing {
        currency: "usd".into(),
        currency_symbol: "$".into(),
        monthly_price: 1999,
        yearly_price: 19990,
    };
    PricingRepo::upsert(&pool, "US", &input).await.unwrap();

    let cheaper = UpsertRegionalPricing {
        monthly_price: 999,
        ..input
    };
    let updated = PricingRepo::upsert(&pool, "US", &cheaper).await.unwrap();
    assert_eq!(updated.monthly_price, 999);

    assert_eq!(PricingRepo::list(&pool).await.unwrap().len(), 1);
    assert!(PricingRepo::find_by_region(&pool, "DE").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Watch history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn watch_progress_upserts_per_user_video_pair(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap();

    let first = VideoRepo::upsert_watch_progress(&pool, user.id, 42, 30).await.unwrap();
    let second = VideoRepo::upsert_watch_progress(&pool, user.id, 42, 95).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.progress_seconds, 95);

    let history = VideoRepo::list_watch_history(&pool, user.id, 10, 0).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(VideoRepo::count_watch_history(&pool, user.id).await.unwrap(), 1);
}
