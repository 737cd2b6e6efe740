//! Leads surfaced to vendors and their status lifecycle.

use serde::{Deserialize, Serialize};

/// Lead lifecycle: `new → contacted → quoted → won | lost`.
///
/// Transitions only happen through explicit vendor action; `won` and `lost`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Quoted,
    Won,
    Lost,
}

impl LeadStatus {
    /// Whether moving from `self` to `next` is a legal lifecycle step.
    #[must_use]
    pub fn can_transition(self, next: LeadStatus) -> bool {
        matches!(
            (self, next),
            (LeadStatus::New, LeadStatus::Contacted)
                | (LeadStatus::Contacted, LeadStatus::Quoted)
                | (LeadStatus::Quoted, LeadStatus::Won | LeadStatus::Lost)
        )
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::New => write!(f, "new"),
            LeadStatus::Contacted => write!(f, "contacted"),
            LeadStatus::Quoted => write!(f, "quoted"),
            LeadStatus::Won => write!(f, "won"),
            LeadStatus::Lost => write!(f, "lost"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    High,
    Normal,
}

/// A prospective customer match surfaced to a vendor for follow-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hospital: String,
    pub service_type: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub urgency: Urgency,
    pub status: LeadStatus,
    pub match_score: u8,
}
