//! Integration tests for course playback-order maintenance.
//!
//! Exercises the read-compute-CAS-write cycle against a real database:
//! insertion at every position, removal quirks, reorder validation, ordered
//! resolution, and the optimistic-concurrency guard.

use assert_matches::assert_matches;
use learnhub_core::error::CoreError;
use learnhub_db::error::DbError;
use learnhub_db::models::course::CreateCourse;
use learnhub_db::models::user::CreateUser;
use learnhub_db::models::video::CreateVideo;
use learnhub_db::repositories::{CourseRepo, UserRepo, VideoRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_admin(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: "admin@example.com".into(),
            name: "Admin".into(),
            password_hash: "x".into(),
            role: "admin".into(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_course(pool: &PgPool, created_by: i64) -> i64 {
    CourseRepo::create(
        pool,
        &CreateCourse {
            title: "Rust from scratch".into(),
            subtitle: String::new(),
            description: String::new(),
            thumbnail_url: String::new(),
            is_paid: false,
            is_public: true,
            skills: vec!["rust".into()],
            author: "Ada".into(),
        },
        created_by,
    )
    .await
    .unwrap()
    .id
}

async fn seed_video(pool: &PgPool, course_id: i64, title: &str) -> i64 {
    VideoRepo::create(
        pool,
        &CreateVideo {
            title: title.into(),
            description: String::new(),
            video_url: format!("videos/{title}.mp4"),
            thumbnail_url: format!("thumbs/{title}.jpg"),
            duration_secs: 60,
            is_paid: false,
            course_id,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_course_has_empty_order(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;

    let course = CourseRepo::find_by_id(&pool, course_id).await.unwrap().unwrap();
    assert!(course.video_order.0.is_empty());
    assert_eq!(course.version, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_video_at_every_valid_position(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;
    let b = seed_video(&pool, course_id, "b").await;
    let c = seed_video(&pool, course_id, "c").await;

    CourseRepo::add_video_at(&pool, course_id, a, 0).await.unwrap();
    CourseRepo::add_video_at(&pool, course_id, b, 1).await.unwrap();
    let order = CourseRepo::add_video_at(&pool, course_id, c, 1).await.unwrap();
    assert_eq!(order, vec![a, c, b]);

    let course = CourseRepo::find_by_id(&pool, course_id).await.unwrap().unwrap();
    assert_eq!(course.video_order.0, vec![a, c, b]);
    assert_eq!(course.version, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_video_rejects_out_of_range_position(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;

    let err = CourseRepo::add_video_at(&pool, course_id, a, 1).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidPosition { position: 1, len: 0 }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_video_to_missing_course_is_not_found(pool: PgPool) {
    let err = CourseRepo::add_video_at(&pool, 999, 1, 0).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "Course", id: 999 }));
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_video_preserves_relative_order(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;
    let b = seed_video(&pool, course_id, "b").await;
    let c = seed_video(&pool, course_id, "c").await;

    for (i, id) in [a, b, c].into_iter().enumerate() {
        CourseRepo::add_video_at(&pool, course_id, id, i).await.unwrap();
    }

    let order = CourseRepo::remove_video(&pool, course_id, b).await.unwrap();
    assert_eq!(order, vec![a, c]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_from_empty_order_fails(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;

    let err = CourseRepo::remove_video(&pool, course_id, 1).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::EmptyList));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_absent_video_from_non_empty_order_is_a_no_op(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;
    CourseRepo::add_video_at(&pool, course_id, a, 0).await.unwrap();

    let order = CourseRepo::remove_video(&pool, course_id, a + 100).await.unwrap();
    assert_eq!(order, vec![a]);
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_scenario_matches_expected_sequences(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;
    let b = seed_video(&pool, course_id, "b").await;
    let c = seed_video(&pool, course_id, "c").await;

    // [A, B] -> insert C at 1 -> [A, C, B] -> remove A -> [C, B].
    CourseRepo::add_video_at(&pool, course_id, a, 0).await.unwrap();
    CourseRepo::add_video_at(&pool, course_id, b, 1).await.unwrap();
    assert_eq!(
        CourseRepo::add_video_at(&pool, course_id, c, 1).await.unwrap(),
        vec![a, c, b]
    );
    assert_eq!(
        CourseRepo::remove_video(&pool, course_id, a).await.unwrap(),
        vec![c, b]
    );

    // Reorder to [B, C] succeeds.
    assert_eq!(
        CourseRepo::reorder_videos(&pool, course_id, &[b, c]).await.unwrap(),
        vec![b, c]
    );

    // Reorder containing a never-present id fails and leaves the order as-is.
    let z = 424_242;
    let err = CourseRepo::reorder_videos(&pool, course_id, &[b, z]).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidVideoReference(id)) if id == z);

    let course = CourseRepo::find_by_id(&pool, course_id).await.unwrap().unwrap();
    assert_eq!(course.video_order.0, vec![b, c]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_may_silently_drop_omitted_videos(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;
    let b = seed_video(&pool, course_id, "b").await;

    CourseRepo::add_video_at(&pool, course_id, a, 0).await.unwrap();
    CourseRepo::add_video_at(&pool, course_id, b, 1).await.unwrap();

    // Subset proposals are accepted; the omitted id leaves the ordering.
    let order = CourseRepo::reorder_videos(&pool, course_id, &[b]).await.unwrap();
    assert_eq!(order, vec![b]);
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn videos_resolve_in_stored_order(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;
    let b = seed_video(&pool, course_id, "b").await;

    CourseRepo::add_video_at(&pool, course_id, b, 0).await.unwrap();
    CourseRepo::add_video_at(&pool, course_id, a, 1).await.unwrap();

    let videos = CourseRepo::videos_in_order(&pool, course_id).await.unwrap();
    let ids: Vec<_> = videos.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![b, a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_order_resolves_to_empty_list(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;

    let videos = CourseRepo::videos_in_order(&pool, course_id).await.unwrap();
    assert!(videos.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dangling_reference_fails_the_whole_resolve(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;
    let b = seed_video(&pool, course_id, "b").await;

    CourseRepo::add_video_at(&pool, course_id, a, 0).await.unwrap();
    CourseRepo::add_video_at(&pool, course_id, b, 1).await.unwrap();

    // Delete the video record behind the order's back.
    VideoRepo::delete(&pool, a).await.unwrap();

    let err = CourseRepo::videos_in_order(&pool, course_id).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::DanglingReference(id)) if id == a);
}

// ---------------------------------------------------------------------------
// Concurrency guard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_version_write_updates_nothing(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let course_id = seed_course(&pool, admin).await;
    let a = seed_video(&pool, course_id, "a").await;

    // Bump the version through a normal mutation...
    CourseRepo::add_video_at(&pool, course_id, a, 0).await.unwrap();

    // ...then replay a write carrying the pre-mutation version token.
    let stale = sqlx::query(
        "UPDATE courses SET video_order = '[]', version = version + 1 \
         WHERE id = $1 AND version = 0",
    )
    .bind(course_id)
    .execute(&pool)
    .await
    .unwrap();
    assert_eq!(stale.rows_affected(), 0);

    let course = CourseRepo::find_by_id(&pool, course_id).await.unwrap().unwrap();
    assert_eq!(course.video_order.0, vec![a]);
}
