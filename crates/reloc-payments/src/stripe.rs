//! Hosted payment API client (Stripe-style payment intents).
//!
//! Mirrors the browser SDK's `confirmCardPayment(clientSecret, paymentMethod)`
//! contract: the intent id is the prefix of the client secret, the
//! confirmation is a form-encoded POST, and a declined card comes back as the
//! provider's own error message.

use std::time::Duration;

use serde::Deserialize;

use crate::error::PaymentError;

const DEFAULT_BASE_URL: &str = "https://api.stripe.com/v1";

#[derive(Debug, Deserialize)]
struct IntentResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<IntentError>,
}

#[derive(Debug, Deserialize)]
struct IntentError {
    message: String,
}

/// Result of a confirmation attempt that was not rejected outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Succeeded,
    /// 3-D Secure or similar; the embedding layer must run the action.
    RequiresAction,
    Other(String),
}

/// Client-side payment confirmation using the publishable key.
pub struct StripeGateway {
    http: reqwest::Client,
    base_url: String,
    publishable_key: String,
}

impl StripeGateway {
    /// # Errors
    ///
    /// Returns [`PaymentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(publishable_key: &str) -> Result<Self, PaymentError> {
        Self::with_base_url(publishable_key, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`PaymentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(publishable_key: &str, base_url: &str) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            publishable_key: publishable_key.to_owned(),
        })
    }

    /// The intent id is everything before the `_secret` marker:
    /// `pi_123_secret_456` → `pi_123`.
    #[must_use]
    pub fn intent_id(client_secret: &str) -> &str {
        client_secret
            .find("_secret")
            .map_or(client_secret, |idx| &client_secret[..idx])
    }

    /// Confirms a payment intent with a tokenized payment method.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::Card`] with the provider's message when the card is
    ///   declined or the intent cannot be confirmed.
    /// - [`PaymentError::Http`] on network failure.
    /// - [`PaymentError::Deserialize`] if the response is malformed.
    pub async fn confirm_card_payment(
        &self,
        client_secret: &str,
        payment_method: &str,
    ) -> Result<IntentOutcome, PaymentError> {
        let intent_id = Self::intent_id(client_secret);
        let url = format!("{}/payment_intents/{intent_id}/confirm", self.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.publishable_key, None::<&str>)
            .form(&[
                ("client_secret", client_secret),
                ("payment_method", payment_method),
            ])
            .send()
            .await?;

        let body = response.text().await?;
        let parsed: IntentResponse =
            serde_json::from_str(&body).map_err(|e| PaymentError::Deserialize {
                context: url,
                source: e,
            })?;

        if let Some(error) = parsed.error {
            return Err(PaymentError::Card(error.message));
        }

        match parsed.status.as_deref() {
            Some("succeeded") => Ok(IntentOutcome::Succeeded),
            Some("requires_action") => Ok(IntentOutcome::RequiresAction),
            Some(other) => Ok(IntentOutcome::Other(other.to_owned())),
            None => Err(PaymentError::Card(
                "Payment confirmation returned no status".to_owned(),
            )),
        }
    }
}
