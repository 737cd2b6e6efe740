//! HTTP client for the Cloud API `messages` endpoint.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::WhatsAppError;
use crate::types::{ApiErrorBody, MessagePayload, OutboundMessage, SendResponse};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v18.0";

/// Client for the WhatsApp Business Cloud API.
///
/// Scoped to one business phone number id and its access token. Use
/// [`WhatsAppClient::with_base_url`] to point at a mock server in tests.
pub struct WhatsAppClient {
    http: reqwest::Client,
    base_url: String,
    phone_number_id: String,
    access_token: String,
}

impl WhatsAppClient {
    /// Creates a client against the production Cloud API.
    ///
    /// # Errors
    ///
    /// Returns [`WhatsAppError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(phone_number_id: &str, access_token: &str) -> Result<Self, WhatsAppError> {
        Self::with_base_url(phone_number_id, access_token, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WhatsAppError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        phone_number_id: &str,
        access_token: &str,
        base_url: &str,
    ) -> Result<Self, WhatsAppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            phone_number_id: phone_number_id.to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    /// Sends one message and returns the provider's message id.
    ///
    /// # Errors
    ///
    /// - [`WhatsAppError::Api`] when the Cloud API rejects the message.
    /// - [`WhatsAppError::Http`] on network failure.
    /// - [`WhatsAppError::Deserialize`] if the acknowledgement is malformed.
    pub async fn send(
        &self,
        to: &str,
        payload: MessagePayload,
    ) -> Result<SendResponse, WhatsAppError> {
        let message = OutboundMessage::new(to, payload);
        let url = format!("{}/{}/messages", self.base_url, self.phone_number_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .map_or_else(|| format!("status {status}"), |e| e.message);
            return Err(WhatsAppError::Api(message));
        }

        serde_json::from_str(&body).map_err(|e| WhatsAppError::Deserialize {
            context: url,
            source: e,
        })
    }

    /// Fire-and-forget send: failures are logged and swallowed.
    ///
    /// These are direct third-party calls, so they stay out of the backend
    /// retry queue; a dropped notification is preferable to a duplicate one.
    pub async fn dispatch(&self, to: &str, payload: MessagePayload) {
        if let Err(e) = self.send(to, payload).await {
            tracing::warn!(to, error = %e, "WhatsApp dispatch failed; message dropped");
        }
    }

    /// Plain-text convenience over [`WhatsAppClient::send`].
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_text(&self, to: &str, body: &str) -> Result<SendResponse, WhatsAppError> {
        self.send(to, MessagePayload::text(body)).await
    }

    /// Pushes the new-lead alert to a vendor, fire-and-forget.
    pub async fn dispatch_lead_alert(&self, to: &str, lead: &reloc_core::Lead) {
        self.dispatch(to, MessagePayload::text(crate::templates::vendor_lead_alert(lead)))
            .await;
    }

    /// Pushes a booking confirmation to the customer, fire-and-forget.
    #[allow(clippy::too_many_arguments)]
    pub async fn dispatch_booking_confirmation(
        &self,
        to: &str,
        service: &str,
        provider: &str,
        date: &str,
        time: &str,
        location: &str,
        price: &str,
        reference: &str,
    ) {
        let body = crate::templates::booking_confirmation(
            service, provider, date, time, location, price, reference,
        );
        self.dispatch(to, MessagePayload::text(body)).await;
    }
}

/// Normalizes a UK number to the digits-only `44...` form the API expects.
#[must_use]
pub fn normalize_uk_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with("44") {
        digits
    } else if let Some(rest) = digits.strip_prefix('0') {
        format!("44{rest}")
    } else {
        format!("44{digits}")
    }
}

/// UK mobile/landline shape check over the digits-only form.
#[must_use]
pub fn valid_uk_number(phone: &str) -> bool {
    let pattern = regex::Regex::new(r"^(?:44)?\d{10,11}$").expect("valid uk phone regex");
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    pattern.is_match(&digits)
}

/// Builds a `wa.me` deep link with the message pre-filled, for the
/// no-session contact path.
#[must_use]
pub fn wa_me_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let encoded = utf8_percent_encode(message, NON_ALPHANUMERIC);
    format!("https://wa.me/{digits}?text={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_the_three_prefix_forms() {
        assert_eq!(normalize_uk_number("+44 7700 123456"), "447700123456");
        assert_eq!(normalize_uk_number("07700123456"), "447700123456");
        assert_eq!(normalize_uk_number("7700123456"), "447700123456");
    }

    #[test]
    fn validation_accepts_normalized_numbers_and_rejects_short_ones() {
        assert!(valid_uk_number("+447700123456"));
        assert!(valid_uk_number("07700123456"));
        assert!(!valid_uk_number("12345"));
    }

    #[test]
    fn wa_me_link_encodes_the_message() {
        let link = wa_me_link("+447700123456", "Hi there!");
        assert!(link.starts_with("https://wa.me/447700123456?text="));
        assert!(link.contains("Hi%20there%21"));
    }
}
