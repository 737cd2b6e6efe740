//! Saved services, kept entirely client-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reloc_core::Vendor;

use crate::profile::{ProfileStore, FAVORITES_KEY};
use crate::StoreError;

/// Snapshot of the vendor fields worth keeping once the live record is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub business_name: String,
    pub category: String,
    pub rating: f64,
    pub description: String,
    pub saved_at: DateTime<Utc>,
}

impl FavoriteEntry {
    fn snapshot(vendor: &Vendor) -> Self {
        Self {
            id: vendor.id.clone(),
            business_name: vendor.business_name.clone(),
            category: vendor.service_category.clone(),
            rating: vendor.rating,
            description: vendor.description.clone(),
            saved_at: Utc::now(),
        }
    }
}

/// The favorites collection, unique by vendor id, persisted on every mutation.
#[derive(Debug)]
pub struct Favorites {
    store: ProfileStore,
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    /// Loads the persisted collection; a missing or corrupt document loads as
    /// empty.
    #[must_use]
    pub fn load(store: ProfileStore) -> Self {
        let entries = store
            .get::<Vec<FavoriteEntry>>(FAVORITES_KEY)
            .unwrap_or_default()
            .unwrap_or_default();
        Self { store, entries }
    }

    #[must_use]
    pub fn is_favorited(&self, vendor_id: &str) -> bool {
        self.entries.iter().any(|fav| fav.id == vendor_id)
    }

    /// Adds a vendor snapshot. Returns `false` (without persisting) if it was
    /// already saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be persisted.
    pub fn add(&mut self, vendor: &Vendor) -> Result<bool, StoreError> {
        if self.is_favorited(&vendor.id) {
            return Ok(false);
        }
        self.entries.push(FavoriteEntry::snapshot(vendor));
        self.persist()?;
        Ok(true)
    }

    /// Removes by vendor id. Returns `false` (without persisting) if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be persisted.
    pub fn remove(&mut self, vendor_id: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|fav| fav.id != vendor_id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Flips membership and returns the new state (`true` = now saved).
    ///
    /// Two identical toggles return the collection to its original membership.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be persisted.
    pub fn toggle(&mut self, vendor: &Vendor) -> Result<bool, StoreError> {
        if self.is_favorited(&vendor.id) {
            self.remove(&vendor.id)?;
            Ok(false)
        } else {
            self.add(vendor)?;
            Ok(true)
        }
    }

    #[must_use]
    pub fn all(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&FavoriteEntry> {
        self.entries
            .iter()
            .filter(|fav| fav.category == category)
            .collect()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Empties the collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be persisted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.set(FAVORITES_KEY, &self.entries)
    }
}
