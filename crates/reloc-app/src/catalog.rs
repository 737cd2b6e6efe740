//! Directory loading, search, and the stale-response guard.
//!
//! The controller owns the vendor/hospital lists behind the home and search
//! views. Searches go to the backend first and fall back to filtering the
//! last-loaded list; whether a failed *load* substitutes the seed catalog is
//! an environment policy. Every mutable update carries a generation number so
//! a slow response that loses the race never clobbers a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use reloc_api::types::Metadata;
use reloc_api::{ApiClient, ApiError};
use reloc_core::{
    matches_location, matches_query, sort_by_tier, Environment, Hospital, SeedCatalog, Tier,
    Vendor,
};

use crate::loading::LoadingTracker;

/// What a failed directory load falls back to.
///
/// The demo behavior (silently substituting the seed catalog) is kept for
/// development and test; production surfaces the error so real outages are
/// visible instead of masked by fake data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    Seed,
    Surface,
}

impl FallbackPolicy {
    #[must_use]
    pub fn for_environment(env: &Environment) -> Self {
        match env {
            Environment::Development | Environment::Test => FallbackPolicy::Seed,
            Environment::Production => FallbackPolicy::Surface,
        }
    }
}

pub struct CatalogController {
    api: Arc<ApiClient>,
    seed: SeedCatalog,
    policy: FallbackPolicy,
    loading: LoadingTracker,
    vendors: Mutex<Vec<Vendor>>,
    hospitals: Mutex<Vec<Hospital>>,
    metadata: Mutex<Metadata>,
    results: Mutex<Vec<Vendor>>,
    generation: AtomicU64,
}

impl CatalogController {
    #[must_use]
    pub fn new(
        api: Arc<ApiClient>,
        seed: SeedCatalog,
        policy: FallbackPolicy,
        loading: LoadingTracker,
    ) -> Self {
        Self {
            api,
            seed,
            policy,
            loading,
            vendors: Mutex::new(Vec::new()),
            hospitals: Mutex::new(Vec::new()),
            metadata: Mutex::new(Metadata::default()),
            results: Mutex::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    #[must_use]
    pub fn vendors(&self) -> Vec<Vendor> {
        self.vendors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn hospitals(&self) -> Vec<Hospital> {
        self.hospitals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn metadata(&self) -> Metadata {
        self.metadata
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The current search-results view.
    #[must_use]
    pub fn results(&self) -> Vec<Vendor> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Loads hospitals and vendors for the initial render.
    ///
    /// # Errors
    ///
    /// Under [`FallbackPolicy::Surface`], the [`ApiError`] from either load.
    /// Under [`FallbackPolicy::Seed`] a failed load substitutes the seed
    /// catalog and succeeds.
    pub async fn load(&self) -> Result<(), ApiError> {
        let _guard = self.loading.start("catalog");

        match self.api.list_hospitals().await {
            Ok(hospitals) => {
                *self
                    .hospitals
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = hospitals;
            }
            Err(e) if self.policy == FallbackPolicy::Seed => {
                tracing::warn!(error = %e, "hospital load failed; using seed catalog");
                *self
                    .hospitals
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = self.seed.hospitals.clone();
            }
            Err(e) => return Err(e),
        }

        match self.api.search_services(None, None).await {
            Ok(mut vendors) => {
                sort_by_tier(&mut vendors);
                *self.vendors.lock().unwrap_or_else(PoisonError::into_inner) = vendors;
            }
            Err(e) if self.policy == FallbackPolicy::Seed => {
                tracing::warn!(error = %e, "vendor load failed; using seed catalog");
                let mut vendors = self.seed.vendors.clone();
                sort_by_tier(&mut vendors);
                *self.vendors.lock().unwrap_or_else(PoisonError::into_inner) = vendors;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Loads regions, trusts, and categories for the search form.
    ///
    /// # Errors
    ///
    /// The first [`ApiError`] from the joint metadata fetch.
    pub async fn load_metadata(&self) -> Result<(), ApiError> {
        let metadata = self.api.load_metadata().await?;
        *self
            .metadata
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = metadata;
        Ok(())
    }

    /// Free-text search. Backend first; on any failure, filters the
    /// last-loaded vendor list in memory. Results always come back in the
    /// canonical tier/rating order.
    ///
    /// The returned list is the *current* view: if a newer search committed
    /// while this one was in flight, the stale result is discarded and the
    /// newer view is returned instead.
    pub async fn search(&self, location: &str, category: &str) -> Vec<Vendor> {
        let generation = self.next_generation();
        let _guard = self.loading.start("search");

        let vendors = match self
            .api
            .search_services(blank_to_none(location), blank_to_none(category))
            .await
        {
            Ok(mut vendors) => {
                sort_by_tier(&mut vendors);
                vendors
            }
            Err(e) => {
                tracing::warn!(error = %e, "search request failed; filtering last-loaded list");
                self.local_search(location, category)
            }
        };

        self.commit(generation, vendors)
    }

    /// Category-card click: exact category match over the loaded list.
    pub fn filter_by_category(&self, category: &str) -> Vec<Vendor> {
        let generation = self.next_generation();
        let mut vendors: Vec<Vendor> = self
            .vendors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|v| v.service_category.eq_ignore_ascii_case(category))
            .cloned()
            .collect();
        sort_by_tier(&mut vendors);
        self.commit(generation, vendors)
    }

    /// Featured/premium vendors for the home view.
    #[must_use]
    pub fn featured(&self) -> Vec<Vendor> {
        let mut vendors: Vec<Vendor> = self
            .vendors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|v| v.tier != Tier::Basic)
            .cloned()
            .collect();
        sort_by_tier(&mut vendors);
        vendors
    }

    #[must_use]
    pub fn vendor_by_id(&self, vendor_id: &str) -> Option<Vendor> {
        self.vendors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|v| v.id == vendor_id)
            .cloned()
    }

    /// Records a detail-view click. Analytics only: failures are logged and
    /// swallowed.
    pub async fn track_click(&self, vendor_id: &str) {
        if let Err(e) = self.api.track_event("vendor_view", vendor_id, None).await {
            tracing::debug!(vendor_id, error = %e, "event tracking failed");
        }
    }

    fn local_search(&self, location: &str, category: &str) -> Vec<Vendor> {
        let mut vendors: Vec<Vendor> = self
            .vendors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|v| blank_to_none(category).is_none_or(|q| matches_query(v, q)))
            .filter(|v| blank_to_none(location).is_none_or(|q| matches_location(v, q)))
            .cloned()
            .collect();
        sort_by_tier(&mut vendors);
        vendors
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Applies `vendors` to the results view only when `generation` is still
    /// current; a stale response returns the newer committed view instead.
    fn commit(&self, generation: u64, vendors: Vec<Vendor>) -> Vec<Vendor> {
        if self.generation.load(Ordering::SeqCst) == generation {
            *self.results.lock().unwrap_or_else(PoisonError::into_inner) = vendors.clone();
            vendors
        } else {
            tracing::debug!(generation, "discarding stale search results");
            self.results()
        }
    }
}

fn blank_to_none(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
