//! Role name constants shared by the auth layer and seed data.

/// Administrator: full access to course/video/product management.
pub const ROLE_ADMIN: &str = "admin";

/// Regular user: browse courses, watch videos, manage own subscription.
pub const ROLE_USER: &str = "user";
