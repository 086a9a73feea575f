//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Plain CRUD returns `sqlx::Error`;
//! operations that also run domain logic (course ordering, webhook
//! reconciliation) return [`crate::error::DbError`].

pub mod course_repo;
pub mod otp_repo;
pub mod payment_repo;
pub mod pricing_repo;
pub mod product_repo;
pub mod subscription_repo;
pub mod user_repo;
pub mod video_repo;

pub use course_repo::CourseRepo;
pub use otp_repo::OtpRepo;
pub use payment_repo::PaymentRepo;
pub use pricing_repo::PricingRepo;
pub use product_repo::ProductRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
