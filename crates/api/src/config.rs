use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Payment provider configuration.
    pub stripe: StripeConfig,
    /// Object storage configuration.
    pub storage: StorageConfig,
}

/// Stripe API configuration.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (`sk_...`). Empty disables the checkout endpoints.
    pub secret_key: String,
    /// Webhook signing secret (`whsec_...`). Empty disables the webhook.
    pub webhook_secret: String,
    /// Redirect target after a successful checkout.
    pub success_url: String,
    /// Redirect target after an abandoned checkout.
    pub cancel_url: String,
}

/// S3 bucket configuration for video and thumbnail objects.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub video_bucket: String,
    pub thumbnail_bucket: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                  |
    /// |-------------------------|------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                |
    /// | `PORT`                  | `8080`                                   |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`                  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                     |
    /// | `STRIPE_SECRET_KEY`     | empty                                    |
    /// | `STRIPE_WEBHOOK_SECRET` | empty                                    |
    /// | `CHECKOUT_SUCCESS_URL`  | `http://localhost:3000/payment/success`  |
    /// | `CHECKOUT_CANCEL_URL`   | `http://localhost:3000/payment/cancel`   |
    /// | `AWS_BUCKET_NAME`       | `learnhub-videos`                        |
    /// | `AWS_THUMBNAIL_BUCKET`  | `learnhub-thumbnails`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let stripe = StripeConfig {
            secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_default(),
            success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| "http://localhost:3000/payment/success".into()),
            cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| "http://localhost:3000/payment/cancel".into()),
        };

        let storage = StorageConfig {
            video_bucket: std::env::var("AWS_BUCKET_NAME")
                .unwrap_or_else(|_| "learnhub-videos".into()),
            thumbnail_bucket: std::env::var("AWS_THUMBNAIL_BUCKET")
                .unwrap_or_else(|_| "learnhub-thumbnails".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            stripe,
            storage,
        }
    }
}
