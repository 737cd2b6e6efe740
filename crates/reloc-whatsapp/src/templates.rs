//! Canned reply templates with placeholder substitution.
//!
//! Copy lives here so every surface (webhook replies, booking confirmations,
//! lead alerts) sends the same wording. Auto-replies pick between the default
//! and out-of-office variants on UK office hours.

use chrono::{Datelike, Timelike, Weekday};

use reloc_core::Lead;

/// Office hours: Monday–Friday, 09:00–18:00.
pub const OFFICE_HOURS_START: u32 = 9;
pub const OFFICE_HOURS_END: u32 = 18;

/// Whether `t` falls inside support office hours.
pub fn is_office_hours<T: Datelike + Timelike>(t: &T) -> bool {
    let weekday = matches!(
        t.weekday(),
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri
    );
    weekday && t.hour() >= OFFICE_HOURS_START && t.hour() < OFFICE_HOURS_END
}

/// Default or out-of-office auto-reply, chosen by office hours.
pub fn auto_reply<T: Datelike + Timelike>(now: &T) -> &'static str {
    if is_office_hours(now) {
        default_reply()
    } else {
        out_of_office_reply()
    }
}

#[must_use]
pub fn default_reply() -> &'static str {
    "Thanks for your message! \u{1f44b}\n\nOur team will respond within 2 hours during business hours.\n\nQuick help:\nReply HELP for commands\nReply STATUS for updates\nVisit: nhsservicehub.com\n\nNHS Service Hub Team"
}

#[must_use]
pub fn out_of_office_reply() -> &'static str {
    "Thank you for contacting NHS Service Hub!\n\nWe're currently outside office hours (9 AM - 6 PM, Monday-Friday).\n\nFor urgent matters:\nEmergency: 999\nNHS 111: 111\n\nWe'll respond during business hours.\n\nNHS Service Hub Team"
}

#[must_use]
pub fn help_message() -> &'static str {
    "NHS Service Hub Help\n\nQuick Commands:\nACCEPT [ID] - Accept lead\nINFO [ID] - Lead details\nSTATUS - Check status\nHELP - This message\n\nSupport:\nnhsservicehub.com\nsupport@nhsservicehub.com\n0800 NHS HELP\n\nReply with any question!"
}

#[must_use]
pub fn booking_inquiry_reply() -> &'static str {
    "Thank you for your booking inquiry!\n\nTo make a booking:\n1. Visit nhsservicehub.com\n2. Search for services\n3. Select your preferred provider\n4. Complete booking form\n\nOr reply with your specific requirements and we'll help you find the right service!"
}

#[must_use]
pub fn emergency_reply() -> &'static str {
    "\u{1f6a8} For medical emergencies:\n\nEmergency: 999\nNHS 111: 111\n\nFor urgent non-medical service requests, our team will prioritize your message. Expected response: 30 minutes.\n\nStay safe!"
}

#[must_use]
pub fn cancel_reply() -> &'static str {
    "Understood - nothing has been booked or accepted on your behalf.\n\nIf you declined a lead, it returns to the pool for other providers. Reply HELP for commands."
}

#[must_use]
pub fn missing_lead_id_reply(command: &str) -> String {
    format!("Please include the Lead ID. Reply: \"{command} [Lead ID]\"")
}

#[must_use]
pub fn lead_unavailable_reply(lead_id: &str) -> String {
    format!("Lead {lead_id} is no longer available or already accepted.")
}

/// Confirmation sent to the vendor after a successful claim.
#[must_use]
pub fn lead_accepted_reply(
    lead_id: &str,
    customer_name: &str,
    service_type: &str,
    customer_phone: Option<&str>,
) -> String {
    let contact = customer_phone.map_or_else(
        || "Customer contact details have been sent to your email.".to_owned(),
        |phone| format!("Customer contact: {phone}"),
    );
    format!(
        "\u{2705} Lead {lead_id} accepted!\n\nCustomer: {customer_name}\nService: {service_type}\n\n{contact}\n\nPlease contact them within 2 hours."
    )
}

/// Heads-up sent to the customer once a provider claims their request.
#[must_use]
pub fn lead_accepted_customer_notice(lead_id: &str, service_type: &str) -> String {
    format!(
        "Great news! Your {service_type} request has been accepted by a qualified provider. They will contact you shortly. Reference: {lead_id}"
    )
}

/// Full lead details for an INFO request.
#[must_use]
pub fn lead_info_reply(lead: &Lead) -> String {
    format!(
        "Lead {id} Details\n\nName: {name}\nHospital: {hospital}\nService: {service}\nBudget: {budget}\nPreferred Date: {date}\nLocation: {location}\nScore: {score}/100\n\nReply \"ACCEPT {id}\" to claim",
        id = lead.id,
        name = lead.customer_name,
        hospital = lead.hospital,
        service = lead.service_type,
        budget = lead.budget,
        date = lead.preferred_date.as_deref().unwrap_or("flexible"),
        location = lead.location,
        score = lead.match_score,
    )
}

/// Pipeline summary for a STATUS request.
#[must_use]
pub fn status_summary(active_leads: usize, completed: usize, conversion_pct: u32) -> String {
    format!(
        "\u{1f4ca} Your Status Update\n\nActive Leads: {active_leads}\nCompleted Jobs: {completed}\nConversion Rate: {conversion_pct}%\n\nReply INFO [Lead ID] for lead details"
    )
}

/// New-lead alert pushed to a vendor.
#[must_use]
pub fn vendor_lead_alert(lead: &Lead) -> String {
    format!(
        "\u{1f6a8} New Lead Alert - NHS Service Hub\n\nYou have a new lead:\n\nHealthcare Worker: {name}\nHospital: {hospital}\nService Needed: {service}\nLead Score: {score}/100\nBudget: {budget}\n\nReply \"ACCEPT {id}\" to claim this lead\nReply \"INFO {id}\" for more details",
        name = lead.customer_name,
        hospital = lead.hospital,
        service = lead.service_type,
        score = lead.match_score,
        budget = lead.budget,
        id = lead.id,
    )
}

/// Booking confirmation pushed to the customer.
#[must_use]
pub fn booking_confirmation(
    service: &str,
    provider: &str,
    date: &str,
    time: &str,
    location: &str,
    price: &str,
    reference: &str,
) -> String {
    format!(
        "NHS Service Hub - Booking Confirmation\n\nHi! Your booking has been confirmed:\n\nService: {service}\nProvider: {provider}\nDate: {date}\nTime: {time}\nLocation: {location}\nPrice: {price}\n\nBooking Reference: {reference}\n\nYour provider will contact you shortly to confirm details. If you have any questions, reply to this message!\n\nBest regards,\nNHS Service Hub Team"
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(weekday_date: (i32, u32, u32), hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(weekday_date.0, weekday_date.1, weekday_date.2)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn weekday_inside_hours_is_office_time() {
        // 2025-03-10 is a Monday.
        assert!(is_office_hours(&at((2025, 3, 10), 9)));
        assert!(is_office_hours(&at((2025, 3, 10), 17)));
    }

    #[test]
    fn boundaries_and_weekends_are_out_of_office() {
        assert!(!is_office_hours(&at((2025, 3, 10), 8)));
        assert!(!is_office_hours(&at((2025, 3, 10), 18)));
        // 2025-03-15 is a Saturday.
        assert!(!is_office_hours(&at((2025, 3, 15), 12)));
    }

    #[test]
    fn auto_reply_switches_on_office_hours() {
        assert_eq!(auto_reply(&at((2025, 3, 10), 10)), default_reply());
        assert_eq!(auto_reply(&at((2025, 3, 15), 10)), out_of_office_reply());
    }

    #[test]
    fn status_summary_carries_the_counts() {
        let summary = status_summary(3, 7, 58);
        assert!(summary.contains("Active Leads: 3"));
        assert!(summary.contains("Completed Jobs: 7"));
        assert!(summary.contains("Conversion Rate: 58%"));
    }

    #[test]
    fn lead_info_reply_substitutes_the_lead_fields() {
        let lead = Lead {
            id: "42".to_owned(),
            customer_name: "Dr. Sarah Johnson".to_owned(),
            email: None,
            phone: None,
            hospital: "St Thomas' Hospital".to_owned(),
            service_type: "Temporary Accommodation".to_owned(),
            budget: "£1,200-£1,500".to_owned(),
            preferred_date: Some("2025-01-15".to_owned()),
            location: "Central London".to_owned(),
            notes: None,
            urgency: reloc_core::Urgency::High,
            status: reloc_core::LeadStatus::New,
            match_score: 92,
        };
        let reply = lead_info_reply(&lead);
        assert!(reply.contains("Lead 42 Details"));
        assert!(reply.contains("Dr. Sarah Johnson"));
        assert!(reply.contains("Score: 92/100"));
        assert!(reply.contains("ACCEPT 42"));
    }
}
