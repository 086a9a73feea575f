//! HTTP handlers, one module per resource.

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
