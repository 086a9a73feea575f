//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod course;
pub mod otp;
pub mod payment;
pub mod pricing;
pub mod product;
pub mod subscription;
pub mod user;
pub mod video;
