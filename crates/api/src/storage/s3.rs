//! Presigned-URL client for the video and thumbnail buckets.
//!
//! Clients upload and watch videos directly against object storage; the API
//! only ever hands out time-limited URLs. Region and credentials come from
//! the standard AWS environment/config chain.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;

use crate::config::StorageConfig;

/// Upload URLs are valid for one hour.
pub const UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(60 * 60);

/// Watch URLs are valid for twelve hours (long enough for a full course
/// sitting).
pub const WATCH_URL_EXPIRY: Duration = Duration::from_secs(12 * 60 * 60);

/// Errors from presigning or object requests.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Presigning failed: {0}")]
    Presign(String),

    #[error("Object request failed: {0}")]
    Request(String),
}

/// S3 client wrapper bound to the platform's two buckets.
#[derive(Debug, Clone)]
pub struct ObjectStorage {
    client: aws_sdk_s3::Client,
    video_bucket: String,
    thumbnail_bucket: String,
}

impl ObjectStorage {
    /// Build a client from the ambient AWS configuration chain.
    pub async fn from_env(config: &StorageConfig) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&aws_config),
            video_bucket: config.video_bucket.clone(),
            thumbnail_bucket: config.thumbnail_bucket.clone(),
        }
    }

    /// Presigned PUT URL for uploading a video object.
    pub async fn video_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.presign_put(&self.video_bucket, key, content_type).await
    }

    /// Presigned PUT URL for uploading a thumbnail object.
    pub async fn thumbnail_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.presign_put(&self.thumbnail_bucket, key, content_type)
            .await
    }

    /// Presigned GET URL for watching a video object.
    pub async fn watch_url(&self, key: &str) -> Result<String, StorageError> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.video_bucket)
            .key(key)
            .presigned(presign_config(WATCH_URL_EXPIRY)?)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        Ok(presigned.uri().to_string())
    }

    /// Whether a video object exists.
    pub async fn video_exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.video_bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::Request(service_err.to_string()))
                }
            }
        }
    }

    /// Delete a video object.
    pub async fn delete_video(&self, key: &str) -> Result<(), StorageError> {
        self.delete(&self.video_bucket, key).await
    }

    /// Delete a thumbnail object.
    pub async fn delete_thumbnail(&self, key: &str) -> Result<(), StorageError> {
        self.delete(&self.thumbnail_bucket, key).await
    }

    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presign_config(UPLOAD_URL_EXPIRY)?)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        Ok(presigned.uri().to_string())
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Ok(())
    }
}

fn presign_config(expiry: Duration) -> Result<PresigningConfig, StorageError> {
    PresigningConfig::expires_in(expiry).map_err(|e| StorageError::Presign(e.to_string()))
}
