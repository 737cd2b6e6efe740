//! Booking and payment-intent endpoints.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    CreateBookingRequest, CreateBookingResponse, CreateIntentRequest, CreateIntentResponse,
};

impl ApiClient {
    /// Creates a booking; the status field carries `pending_payment` for bank
    /// transfers and `confirmed` for settled card payments.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<CreateBookingResponse, ApiError> {
        self.post_json("/bookings/create", request).await
    }

    /// Asks the backend to open a payment intent for the given amount.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn create_payment_intent(
        &self,
        request: &CreateIntentRequest,
    ) -> Result<CreateIntentResponse, ApiError> {
        self.post_json("/payments/create-intent", request).await
    }

    /// Confirms a settled intent server-side after the card flow succeeds.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn confirm_payment(&self, intent_id: &str) -> Result<(), ApiError> {
        self.execute_unit(
            self.http()
                .post(self.url(&format!("/payments/confirm/{intent_id}"))),
        )
        .await
    }
}
