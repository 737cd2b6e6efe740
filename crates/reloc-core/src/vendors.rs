//! Vendor records and the listing-order business rule.
//!
//! Listings are always presented tier-first: `premium` ahead of `featured`
//! ahead of `basic`, ties broken by rating descending. Unknown tiers coming
//! off the wire rank as `basic`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Vendor listing priority class. Affects sort order only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Featured,
    Premium,
    #[serde(other)]
    Basic,
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Basic
    }
}

impl Tier {
    /// Numeric rank used by the listing order: `premium=3, featured=2, basic=1`.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Tier::Premium => 3,
            Tier::Featured => 2,
            Tier::Basic => 1,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Basic => write!(f, "basic"),
            Tier::Featured => write!(f, "featured"),
            Tier::Premium => write!(f, "premium"),
        }
    }
}

/// A listed provider of a relocation-support service.
///
/// Sourced from API search results or the seed catalog; never mutated by the
/// client outside explicit admin/vendor-portal update calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub business_name: String,
    pub service_category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Sorts vendors in the canonical listing order: tier rank descending, then
/// rating descending. The sort is stable, so equally ranked vendors keep
/// their incoming order.
pub fn sort_by_tier(vendors: &mut [Vendor]) {
    vendors.sort_by(|a, b| {
        b.tier
            .rank()
            .cmp(&a.tier.rank())
            .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
    });
}

/// Case-insensitive substring match on category and description.
#[must_use]
pub fn matches_query(vendor: &Vendor, query: &str) -> bool {
    let needle = query.to_lowercase();
    vendor.service_category.to_lowercase().contains(&needle)
        || vendor.description.to_lowercase().contains(&needle)
}

/// Case-insensitive substring match on location.
#[must_use]
pub fn matches_location(vendor: &Vendor, location: &str) -> bool {
    let needle = location.to_lowercase();
    vendor.location.to_lowercase().contains(&needle)
}
