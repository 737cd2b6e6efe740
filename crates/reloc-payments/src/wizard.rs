//! The three-step booking wizard.
//!
//! `Details → Payment → Confirmation`, strictly forward except for the single
//! `Payment → Details` back edge. Confirmation is terminal.

use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use reloc_api::types::{CreateBookingRequest, CreateIntentRequest};
use reloc_api::ApiClient;
use reloc_core::{BookingDetails, BookingStatus};

use crate::error::PaymentError;
use crate::stripe::{IntentOutcome, StripeGateway};

/// Delay between showing the transfer instructions and moving to
/// Confirmation, matching the original flow's pause.
pub const BANK_TRANSFER_CONFIRM_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Details,
    Payment,
    Confirmation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    BankTransfer,
}

/// The service snapshot the wizard was opened with; held in memory only for
/// the duration of the flow.
#[derive(Debug, Clone)]
pub struct ServiceSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub provider: String,
    pub location: String,
    /// Price in pence.
    pub price_pence: u64,
}

/// Terminal state of a completed flow.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub booking_id: String,
    pub payment_status: BookingStatus,
    /// Bank-transfer reference (`JR` + last six of the booking id); absent
    /// for card payments.
    pub reference: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Please select both date and time")]
    MissingDateTime,

    #[error("invalid booking {field}: {value}")]
    InvalidDateTime { field: &'static str, value: String },

    #[error("step does not allow {action}")]
    InvalidStep { action: &'static str },
}

pub struct BookingWizard {
    service: ServiceSummary,
    step: WizardStep,
    method: PaymentMethod,
    details: Option<BookingDetails>,
    confirmation: Option<Confirmation>,
}

impl BookingWizard {
    #[must_use]
    pub fn new(service: ServiceSummary) -> Self {
        Self {
            service,
            step: WizardStep::Details,
            method: PaymentMethod::Card,
            details: None,
            confirmation: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    #[must_use]
    pub fn service(&self) -> &ServiceSummary {
        &self.service
    }

    #[must_use]
    pub fn details(&self) -> Option<&BookingDetails> {
        self.details.as_ref()
    }

    #[must_use]
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Validates the picked date/time and advances Details → Payment.
    ///
    /// # Errors
    ///
    /// - [`WizardError::MissingDateTime`] when either field is empty; the
    ///   step does not change.
    /// - [`WizardError::InvalidDateTime`] when a field does not parse
    ///   (`YYYY-MM-DD` / `HH:MM`); the step does not change.
    /// - [`WizardError::InvalidStep`] outside the Details step.
    pub fn proceed_to_payment(
        &mut self,
        date: &str,
        time: &str,
        notes: Option<String>,
    ) -> Result<(), WizardError> {
        if self.step != WizardStep::Details {
            return Err(WizardError::InvalidStep {
                action: "proceed to payment",
            });
        }
        if date.trim().is_empty() || time.trim().is_empty() {
            return Err(WizardError::MissingDateTime);
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            WizardError::InvalidDateTime {
                field: "date",
                value: date.to_owned(),
            }
        })?;
        let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
            WizardError::InvalidDateTime {
                field: "time",
                value: time.to_owned(),
            }
        })?;

        self.details = Some(BookingDetails { date, time, notes });
        self.step = WizardStep::Payment;
        Ok(())
    }

    /// Switches between the two mutually exclusive payment methods.
    ///
    /// # Errors
    ///
    /// [`WizardError::InvalidStep`] outside the Payment step.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<(), WizardError> {
        if self.step != WizardStep::Payment {
            return Err(WizardError::InvalidStep {
                action: "select payment method",
            });
        }
        self.method = method;
        Ok(())
    }

    /// The single allowed backward edge: Payment → Details.
    ///
    /// # Errors
    ///
    /// [`WizardError::InvalidStep`] anywhere else — in particular there is no
    /// way back out of Confirmation.
    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Payment {
            return Err(WizardError::InvalidStep { action: "go back" });
        }
        self.step = WizardStep::Details;
        Ok(())
    }

    fn booking_request(&self, status: BookingStatus) -> Result<CreateBookingRequest, WizardError> {
        let details = self.details.as_ref().ok_or(WizardError::InvalidStep {
            action: "create booking",
        })?;
        let booking_date = details.date.and_time(details.time).and_utc();
        Ok(CreateBookingRequest {
            service_id: self.service.id.clone(),
            booking_date,
            notes: details.notes.clone(),
            status,
        })
    }

    /// Card leg: backend intent → hosted confirmation → backend confirm →
    /// booking. Declines surface the provider's message and leave the wizard
    /// on the Payment step for another attempt.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::Card`] with the provider's text on a decline or an
    ///   unfinished intent.
    /// - [`PaymentError::Api`] when a backend call fails.
    /// - [`PaymentError::Wizard`] when driven outside the Payment step.
    pub async fn pay_by_card(
        &mut self,
        api: &ApiClient,
        stripe: &StripeGateway,
        payment_method: &str,
    ) -> Result<&Confirmation, PaymentError> {
        if self.step != WizardStep::Payment {
            return Err(WizardError::InvalidStep { action: "pay" }.into());
        }

        let intent = api
            .create_payment_intent(&CreateIntentRequest {
                amount: self.service.price_pence,
                service_id: self.service.id.clone(),
                description: format!("Booking: {}", self.service.title),
            })
            .await?;

        let outcome = stripe
            .confirm_card_payment(&intent.client_secret, payment_method)
            .await?;
        if outcome != IntentOutcome::Succeeded {
            return Err(PaymentError::Card(format!(
                "Payment not completed (intent state: {outcome:?})"
            )));
        }

        api.confirm_payment(&intent.intent_id).await?;

        let booking = api
            .create_booking(&self.booking_request(BookingStatus::Confirmed)?)
            .await?;
        tracing::info!(booking_id = booking.booking_id, "card booking confirmed");

        self.step = WizardStep::Confirmation;
        Ok(self.confirmation.insert(Confirmation {
            booking_id: booking.booking_id,
            payment_status: BookingStatus::Confirmed,
            reference: None,
        }))
    }

    /// Bank-transfer leg: creates the booking in `pending_payment`, derives
    /// the transfer reference, and proceeds to Confirmation after the fixed
    /// delay. No card validation exists on this path, so it cannot fail
    /// client-side.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::Api`] when the booking call fails.
    /// - [`PaymentError::Wizard`] when driven outside the Payment step.
    pub async fn pay_by_bank_transfer(
        &mut self,
        api: &ApiClient,
    ) -> Result<&Confirmation, PaymentError> {
        if self.step != WizardStep::Payment {
            return Err(WizardError::InvalidStep { action: "pay" }.into());
        }

        let booking = api
            .create_booking(&self.booking_request(BookingStatus::PendingPayment)?)
            .await?;
        let reference = bank_transfer_reference(&booking.booking_id);
        tracing::info!(
            booking_id = booking.booking_id,
            reference,
            "bank transfer booking pending"
        );

        tokio::time::sleep(BANK_TRANSFER_CONFIRM_DELAY).await;

        self.step = WizardStep::Confirmation;
        Ok(self.confirmation.insert(Confirmation {
            booking_id: booking.booking_id,
            payment_status: BookingStatus::PendingPayment,
            reference: Some(reference),
        }))
    }
}

/// `JR` + the last six characters of the booking id.
#[must_use]
pub fn bank_transfer_reference(booking_id: &str) -> String {
    let tail_start = booking_id.len().saturating_sub(6);
    format!("JR{}", &booking_id[tail_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ServiceSummary {
        ServiceSummary {
            id: "safestay".to_owned(),
            title: "SafeStay 2-bed flat".to_owned(),
            description: "Modern 2-bed flat".to_owned(),
            provider: "SafeStay Housing Ltd".to_owned(),
            location: "Central London".to_owned(),
            price_pence: 120_000,
        }
    }

    #[test]
    fn valid_date_and_time_advance_to_payment() {
        let mut wizard = BookingWizard::new(service());
        wizard
            .proceed_to_payment("2025-03-10", "14:00", None)
            .expect("valid inputs advance");
        assert_eq!(wizard.step(), WizardStep::Payment);
        let details = wizard.details().unwrap();
        assert_eq!(details.date.to_string(), "2025-03-10");
        assert_eq!(details.time.to_string(), "14:00:00");
    }

    #[test]
    fn empty_date_is_rejected_without_a_transition() {
        let mut wizard = BookingWizard::new(service());
        let err = wizard.proceed_to_payment("", "14:00", None).unwrap_err();
        assert_eq!(err, WizardError::MissingDateTime);
        assert_eq!(err.to_string(), "Please select both date and time");
        assert_eq!(wizard.step(), WizardStep::Details);
        assert!(wizard.details().is_none());
    }

    #[test]
    fn empty_time_is_rejected_without_a_transition() {
        let mut wizard = BookingWizard::new(service());
        let err = wizard
            .proceed_to_payment("2025-03-10", "  ", None)
            .unwrap_err();
        assert_eq!(err, WizardError::MissingDateTime);
        assert_eq!(wizard.step(), WizardStep::Details);
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut wizard = BookingWizard::new(service());
        let err = wizard
            .proceed_to_payment("10/03/2025", "14:00", None)
            .unwrap_err();
        assert!(matches!(err, WizardError::InvalidDateTime { field: "date", .. }));
        assert_eq!(wizard.step(), WizardStep::Details);
    }

    #[test]
    fn back_is_only_allowed_from_payment() {
        let mut wizard = BookingWizard::new(service());
        assert!(wizard.back().is_err());

        wizard
            .proceed_to_payment("2025-03-10", "14:00", None)
            .unwrap();
        wizard.back().unwrap();
        assert_eq!(wizard.step(), WizardStep::Details);
    }

    #[test]
    fn method_selection_requires_the_payment_step() {
        let mut wizard = BookingWizard::new(service());
        assert!(wizard.select_method(PaymentMethod::BankTransfer).is_err());

        wizard
            .proceed_to_payment("2025-03-10", "14:00", None)
            .unwrap();
        wizard.select_method(PaymentMethod::BankTransfer).unwrap();
        assert_eq!(wizard.method(), PaymentMethod::BankTransfer);
    }

    #[test]
    fn bank_transfer_reference_takes_the_last_six() {
        assert_eq!(bank_transfer_reference("bk_abc123456"), "JR123456");
        assert_eq!(bank_transfer_reference("b1"), "JRb1");
    }
}
