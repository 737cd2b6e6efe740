use serde::{Deserialize, Serialize};

use crate::profile::{ProfileStore, TRAVEL_PREFERENCES_KEY};
use crate::StoreError;

/// Travel search defaults applied when the search form loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPreferences {
    #[serde(default)]
    pub preferred_budget: Option<String>,
    #[serde(default)]
    pub preferred_guests: Option<u32>,
}

impl TravelPreferences {
    /// Loads preferences; absent or corrupt documents read as defaults.
    #[must_use]
    pub fn load(store: &ProfileStore) -> Self {
        store
            .get(TRAVEL_PREFERENCES_KEY)
            .unwrap_or_default()
            .unwrap_or_default()
    }

    /// Persists the preferences.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    pub fn save(&self, store: &ProfileStore) -> Result<(), StoreError> {
        store.set(TRAVEL_PREFERENCES_KEY, self)
    }
}
