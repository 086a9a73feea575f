//! Minimal Stripe REST client.
//!
//! Only the two calls the checkout flow needs: customer lookup/creation and
//! subscription checkout-session creation. Requests are form-encoded per the
//! Stripe API; the secret key rides as HTTP basic-auth username.

use learnhub_core::types::DbId;
use serde::Deserialize;

const API_BASE: &str = "https://api.stripe.com/v1";

/// Errors from the payment provider integration.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payment provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Payment provider is not configured")]
    NotConfigured,
}

/// A provider customer; only the id is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct CustomerList {
    data: Vec<Customer>,
}

/// A created checkout session: the id for reconciliation and the hosted URL
/// the client is redirected to.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionLink {
    pub id: String,
    pub url: String,
}

/// Inputs for a subscription checkout session.
#[derive(Debug)]
pub struct CheckoutParams<'a> {
    pub customer_id: &'a str,
    pub currency: &'a str,
    /// Price in the currency's minor units.
    pub unit_amount: i64,
    /// Billing interval (`month` / `year`).
    pub interval: &'a str,
    pub product_name: &'a str,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
}

/// Stripe REST client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Whether a secret key is present. Checkout endpoints refuse to run
    /// without one.
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }

    /// Find the provider customer for an email, creating one (tagged with the
    /// platform user id in its metadata) if none exists.
    pub async fn find_or_create_customer(
        &self,
        email: &str,
        user_id: DbId,
    ) -> Result<Customer, PaymentError> {
        if !self.is_configured() {
            return Err(PaymentError::NotConfigured);
        }

        let response = self
            .http
            .get(format!("{API_BASE}/customers"))
            .basic_auth(&self.secret_key, None::<&str>)
            .query(&[("email", email), ("limit", "1")])
            .send()
            .await?;
        let list: CustomerList = check(response).await?.json().await?;

        if let Some(customer) = list.data.into_iter().next() {
            return Ok(customer);
        }

        let response = self
            .http
            .post(format!("{API_BASE}/customers"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("email", email.to_string()),
                ("metadata[user_id]", user_id.to_string()),
            ])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Create a hosted checkout session for a recurring subscription.
    pub async fn create_subscription_checkout(
        &self,
        params: &CheckoutParams<'_>,
    ) -> Result<CheckoutSessionLink, PaymentError> {
        if !self.is_configured() {
            return Err(PaymentError::NotConfigured);
        }

        let form = [
            ("customer", params.customer_id.to_string()),
            ("mode", "subscription".to_string()),
            ("success_url", params.success_url.to_string()),
            ("cancel_url", params.cancel_url.to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                params.currency.to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                params.unit_amount.to_string(),
            ),
            (
                "line_items[0][price_data][recurring][interval]",
                params.interval.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                params.product_name.to_string(),
            ),
        ];

        let response = self
            .http
            .post(format!("{API_BASE}/checkout/sessions"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

impl From<PaymentError> for crate::error::AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotConfigured => {
                tracing::error!("Checkout requested but no provider secret key is set");
                crate::error::AppError::InternalError(
                    "Payment system is not properly configured".into(),
                )
            }
            other => {
                tracing::error!(error = %other, "Payment provider call failed");
                crate::error::AppError::InternalError("Failed to create payment session".into())
            }
        }
    }
}

/// Turn non-2xx responses into [`PaymentError::Provider`].
async fn check(response: reqwest::Response) -> Result<reqwest::Response, PaymentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(PaymentError::Provider {
        status: status.as_u16(),
        message,
    })
}
