//! Booking wizard and card-payment confirmation.
//!
//! The wizard is a strict three-step machine (`Details → Payment →
//! Confirmation`) over the backend booking endpoints; the card leg hands the
//! intent to the hosted payment API and surfaces its error text verbatim,
//! the bank-transfer leg cannot fail client-side.

mod error;
mod receipt;
mod stripe;
mod wizard;

pub use error::PaymentError;
pub use receipt::{receipt_filename, receipt_text};
pub use stripe::{IntentOutcome, StripeGateway};
pub use wizard::{
    BookingWizard, Confirmation, PaymentMethod, ServiceSummary, WizardError, WizardStep,
};
