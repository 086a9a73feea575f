//! Object-storage integration (S3 presigned URLs).

pub mod s3;
