//! Geocoding adapter and distance helpers for location-based search.

mod client;
mod distance;
mod error;
pub mod types;

pub use client::GeocodingClient;
pub use distance::{haversine_km, within_radius};
pub use error::MapsError;
pub use types::Coordinates;
