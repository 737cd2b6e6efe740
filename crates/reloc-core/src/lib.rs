//! Domain types, business rules, and configuration for the JustRelocation
//! client platform.
//!
//! Everything here is backend-agnostic: records are transient client-side
//! projections of server state, and the only rules enforced locally are the
//! ones the product defines client-side (tier ordering, lead transitions,
//! booking validation).

use thiserror::Error;

pub mod app_config;
pub mod bookings;
pub mod catalog;
mod config;
pub mod hospitals;
pub mod leads;
pub mod users;
pub mod vendors;

pub use app_config::{AppConfig, Environment};
pub use bookings::{BookingDetails, BookingStatus};
pub use catalog::{load_catalog, SeedCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use hospitals::Hospital;
pub use leads::{Lead, LeadStatus, Urgency};
pub use users::{User, UserType};
pub use vendors::{matches_location, matches_query, sort_by_tier, Tier, Vendor};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
