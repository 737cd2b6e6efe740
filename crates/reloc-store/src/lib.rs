//! File-backed preference and session storage.
//!
//! The browser build of this product kept small convenience collections in
//! local storage under well-known keys. This crate reproduces that contract
//! as one JSON document per key inside a profile directory; nothing here is
//! synced to the server.

mod error;
mod favorites;
mod preferences;
mod profile;

pub use error::StoreError;
pub use favorites::{FavoriteEntry, Favorites};
pub use preferences::TravelPreferences;
pub use profile::{
    ProfileStore, AUTH_TOKEN_KEY, FAVORITES_KEY, TRAVEL_PREFERENCES_KEY, USER_KEY,
};
