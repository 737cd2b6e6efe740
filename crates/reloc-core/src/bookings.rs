//! Booking state shared by the payment wizard and the gateway.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Payment state of a booking as the backend tracks it.
///
/// Bank transfers create bookings in `pending_payment`; card payments create
/// them `confirmed` once the intent succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingPayment,
    Confirmed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::PendingPayment => write!(f, "pending_payment"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// The date/time/notes a customer picked in the booking flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub notes: Option<String>,
}
