pub mod admin;
pub mod auth;
pub mod courses;
pub mod health;
pub mod payments;
pub mod products;
pub mod subscriptions;
pub mod uploads;
pub mod users;
pub mod videos;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/otp/verify                        confirm registration code (public)
/// /auth/password-reset/request            request reset code (public)
/// /auth/password-reset/confirm            reset password (public)
///
/// /users/me                               get, update own profile
///
/// /courses                                list (GET), create (POST, admin)
/// /courses/{id}                           get, update, delete (admin)
/// /courses/{id}/videos                    insert into playback order (admin)
/// /courses/{id}/videos/{video_id}         remove from playback order (admin)
/// /courses/{id}/reorder                   replace playback order (admin)
///
/// /videos                                 list (GET), create (POST, admin)
/// /videos/history                         caller's watch history
/// /videos/{id}                            get, update, delete (admin)
/// /videos/{id}/watch                      record watch progress
///
/// /s3/generate-video-url                  presigned video upload URL
/// /s3/generate-thumbnail-url              presigned thumbnail upload URL
///
/// /payments                               list (GET), create checkout (POST)
/// /payments/pricing                       regional pricing lookup
/// /payments/{id}                          get (owner or admin)
///
/// /subscriptions                          list, create
/// /subscriptions/{id}                     get
/// /subscriptions/{id}/cancel              cancel
/// /subscriptions/{id}/reactivate          reactivate
/// /subscriptions/{id}/payment-method      update payment method
///
/// /products                               list, create (admin)
/// /products/{id}                          get, update, delete (admin)
/// /products/{id}/price                    update price (admin)
/// /products/{id}/status                   activate/deactivate (admin)
///
/// /webhooks/stripe                        provider webhook (public, signed)
///
/// /admin/users                            list users
/// /admin/users/stats                      aggregate counts
/// /admin/users/{id}                       update, delete
/// /admin/courses                          unfiltered course listing
/// /admin/pricing/{region}                 upsert regional pricing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/courses", courses::router())
        .nest("/videos", videos::router())
        .nest("/s3", uploads::router())
        .nest("/payments", payments::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/products", products::router())
        .nest("/webhooks", webhooks::router())
        .nest("/admin", admin::router())
}
