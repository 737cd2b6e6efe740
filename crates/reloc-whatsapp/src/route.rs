//! Pure routing of inbound messages to actions.
//!
//! [`route`] never performs I/O: it categorizes the text, extracts a lead id
//! where the category needs one, and returns the decision. The application
//! layer executes backend calls and sends the reply.

use regex::Regex;

use crate::categorize::{categorize, MessageCategory};

/// What the application should do with an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundAction {
    /// Claim the lead and confirm to both parties.
    AcceptLead { lead_id: String },
    /// The sender wants to accept but gave no id; ask for one.
    AcceptLeadMissingId,
    /// Reply with the lead's details.
    LeadInfo { lead_id: String },
    /// The sender wants details but gave no id; ask for one.
    LeadInfoMissingId,
    /// Reply with the sender's bookings/leads summary.
    StatusCheck,
    /// Reply with the command help.
    Help,
    /// Reply with the booking walkthrough.
    BookingInquiry,
    /// Reply with the emergency numbers and alert support.
    Emergency,
    /// Acknowledge the decline.
    Cancel,
    /// Auto-reply and forward to customer service.
    General,
}

/// Extracts a lead id written as `lead_1`, `LEAD 42`, `lead#7`, etc.
///
/// The id is the alphanumeric run after the `lead` marker, separators
/// excluded — `ACCEPT lead_1` yields `1`.
fn extract_lead_id(text: &str) -> Option<String> {
    let pattern = Regex::new(r"(?i)lead[\s_#-]*([A-Za-z0-9]+)").expect("valid lead id regex");
    pattern
        .captures(text)
        .map(|caps| caps[1].to_owned())
}

/// Turns one inbound text into a routing decision.
#[must_use]
pub fn route(text: &str) -> InboundAction {
    match categorize(text) {
        MessageCategory::LeadAcceptance => extract_lead_id(text)
            .map_or(InboundAction::AcceptLeadMissingId, |lead_id| {
                InboundAction::AcceptLead { lead_id }
            }),
        MessageCategory::InfoRequest => extract_lead_id(text)
            .map_or(InboundAction::LeadInfoMissingId, |lead_id| {
                InboundAction::LeadInfo { lead_id }
            }),
        MessageCategory::StatusCheck => InboundAction::StatusCheck,
        MessageCategory::HelpRequest => InboundAction::Help,
        MessageCategory::Booking => InboundAction::BookingInquiry,
        MessageCategory::Emergency => InboundAction::Emergency,
        MessageCategory::Cancel => InboundAction::Cancel,
        MessageCategory::General => InboundAction::General,
    }
}
