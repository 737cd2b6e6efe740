//! Plain-text receipt generated client-side from the booking snapshot.

use reloc_core::BookingDetails;

use crate::wizard::Confirmation;

/// Formats pence as `£X.YY`.
fn format_amount(pence: u64) -> String {
    format!("£{}.{:02}", pence / 100, pence % 100)
}

#[must_use]
pub fn receipt_filename(booking_id: &str) -> String {
    format!("JustRelocation-Receipt-{booking_id}.txt")
}

/// The downloadable receipt body.
#[must_use]
pub fn receipt_text(
    service_title: &str,
    confirmation: &Confirmation,
    details: &BookingDetails,
    amount_pence: u64,
) -> String {
    format!(
        "JUSTRELOCATION RECEIPT\n=====================\nBooking ID: {id}\nService: {service}\nDate: {date} at {time}\nAmount: {amount}\nStatus: {status}\n\nThank you for your booking!\n",
        id = confirmation.booking_id,
        service = service_title,
        date = details.date,
        time = details.time.format("%H:%M"),
        amount = format_amount(amount_pence),
        status = confirmation.payment_status,
    )
}
