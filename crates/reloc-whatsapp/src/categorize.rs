//! Keyword-based inbound message categorization.
//!
//! Matching is case-insensitive substring over per-category keyword lists.
//! Precedence is a fixed, documented order — safety-critical categories
//! first, then declines, then transactional intents — so a message hitting
//! several lists always resolves the same way.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageCategory {
    Emergency,
    Cancel,
    LeadAcceptance,
    Booking,
    StatusCheck,
    InfoRequest,
    HelpRequest,
    General,
}

/// Categories in match-precedence order with their keyword lists.
/// `General` is the fallback and carries no keywords.
const CATEGORY_KEYWORDS: &[(MessageCategory, &[&str])] = &[
    (
        MessageCategory::Emergency,
        &["urgent", "emergency", "immediate", "asap"],
    ),
    (
        MessageCategory::Cancel,
        &["cancel", "decline", "no", "reject"],
    ),
    (
        MessageCategory::LeadAcceptance,
        &["accept", "yes", "claim", "take"],
    ),
    (
        MessageCategory::Booking,
        &["book", "appointment", "schedule", "reserve"],
    ),
    (
        MessageCategory::StatusCheck,
        &["status", "update", "progress", "current"],
    ),
    (
        MessageCategory::InfoRequest,
        &["info", "details", "more", "explain"],
    ),
    (
        MessageCategory::HelpRequest,
        &["help", "support", "assist", "guide"],
    ),
];

/// Classifies a free-text inbound message. Unmatched input is `General`.
#[must_use]
pub fn categorize(text: &str) -> MessageCategory {
    let lowered = text.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *category;
        }
    }
    MessageCategory::General
}
