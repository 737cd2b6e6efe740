//! Application composition root for the JustRelocation client platform.
//!
//! Services are constructed once here and handed to the feature controllers
//! explicitly — there are no ambient globals. The [`App`] owns the shared
//! gateway, session, retry queue, notification center, and loading tracker,
//! plus the optional third-party adapters, and wires the cross-cutting
//! failure path: classify, notify, queue network retries, and tear the
//! session down on 401.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;

use reloc_api::{ApiClient, ApiError, FlushReport, RetryQueue, SessionManager};
use reloc_core::{
    load_app_config, load_catalog, AppConfig, ConfigError, SeedCatalog, Vendor,
};
use reloc_maps::{GeocodingClient, MapsError};
use reloc_payments::{PaymentError, StripeGateway};
use reloc_store::{Favorites, ProfileStore, StoreError, TravelPreferences};
use reloc_whatsapp::{WhatsAppClient, WhatsAppError};

pub mod catalog;
pub mod export;
pub mod loading;
pub mod notify;
pub mod portal;
pub mod render;

pub use catalog::{CatalogController, FallbackPolicy};
pub use export::{ExportController, ExportError, ExportOutcome};
pub use loading::{LoadingGuard, LoadingTracker};
pub use notify::{Notification, NotificationCenter, NotificationKind};
pub use portal::{DashboardStats, PortalController, PortalError};

/// Pause between the expired-session notification and the login redirect.
pub const SESSION_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    WhatsApp(#[from] WhatsAppError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Maps(#[from] MapsError),
}

/// Where the embedding layer should navigate after a handled failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
}

pub struct App {
    config: AppConfig,
    pub api: Arc<ApiClient>,
    pub session: SessionManager,
    pub retry: RetryQueue,
    pub notifications: NotificationCenter,
    pub loading: LoadingTracker,
    pub catalog: CatalogController,
    pub portal: PortalController,
    pub export: ExportController,
    pub whatsapp: Option<Arc<WhatsAppClient>>,
    pub stripe: Option<StripeGateway>,
    pub geocoding: Option<GeocodingClient>,
    favorites: Mutex<Favorites>,
    preferences: TravelPreferences,
}

impl App {
    /// Builds the application from process environment variables.
    ///
    /// # Errors
    ///
    /// [`AppError`] when configuration is missing/invalid or a client cannot
    /// be constructed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(load_app_config()?)
    }

    /// Builds every service from an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`AppError`] when the profile directory, seed catalog, or one of the
    /// HTTP clients cannot be set up.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let store = ProfileStore::open(&config.profile_dir)?;
        let api = Arc::new(ApiClient::new(&config)?);
        let session = SessionManager::new(Arc::clone(&api), store.clone());

        let retry_http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        let retry = RetryQueue::from_config(retry_http, &config);

        let seed = match &config.catalog_path {
            Some(path) => load_catalog(path)?,
            None => SeedCatalog::builtin()?,
        };

        let whatsapp = match (
            &config.whatsapp_phone_number_id,
            &config.whatsapp_access_token,
        ) {
            (Some(phone_number_id), Some(access_token)) => Some(Arc::new(WhatsAppClient::new(
                phone_number_id,
                access_token,
            )?)),
            _ => None,
        };
        let stripe = config
            .stripe_publishable_key
            .as_deref()
            .map(StripeGateway::new)
            .transpose()?;
        let geocoding = config
            .maps_api_key
            .as_deref()
            .map(GeocodingClient::new)
            .transpose()?;

        let loading = LoadingTracker::default();
        let catalog = CatalogController::new(
            Arc::clone(&api),
            seed,
            FallbackPolicy::for_environment(&config.env),
            loading.clone(),
        );
        let portal = PortalController::new(Arc::clone(&api), whatsapp.clone(), loading.clone());
        let export = ExportController::from_config(Arc::clone(&api), &config, loading.clone());

        let favorites = Mutex::new(Favorites::load(store.clone()));
        let preferences = TravelPreferences::load(&store);

        Ok(Self {
            config,
            api,
            session,
            retry,
            notifications: NotificationCenter::default(),
            loading,
            catalog,
            portal,
            export,
            whatsapp,
            stripe,
            geocoding,
            favorites,
            preferences,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Startup sequence: validate any persisted session, then load the
    /// directory and search metadata.
    ///
    /// A failed session validation clears the stored token and continues
    /// anonymously; it never aborts startup. Metadata is also non-fatal — the
    /// search form degrades to free text.
    ///
    /// # Errors
    ///
    /// [`AppError::Api`] when the directory load fails under the surface
    /// policy.
    pub async fn start(&self) -> Result<(), AppError> {
        let _guard = self.loading.start("startup");

        if self.api.token().is_some() {
            if let Err(e) = self.session.validate().await {
                tracing::warn!(error = %e, "stored session rejected; continuing anonymously");
            }
        }

        self.catalog.load().await?;

        if let Err(e) = self.catalog.load_metadata().await {
            tracing::warn!(error = %e, "metadata load failed; search form degrades to free text");
        }

        tracing::info!(env = %self.config.env, "application started");
        Ok(())
    }

    /// The cross-cutting failure path. Shows the mapped notification, queues
    /// network failures for retry, and on 401 clears the session and — after
    /// [`SESSION_REDIRECT_DELAY`] — signals the login redirect.
    pub async fn handle_failure(
        &self,
        error: &ApiError,
        request_url: Option<&str>,
    ) -> Option<Redirect> {
        self.notifications.report(error);

        if error.is_network() {
            if let Some(url) = request_url {
                self.retry.queue(url);
            }
            return None;
        }

        if error.is_auth() {
            self.session.handle_unauthorized();
            tokio::time::sleep(SESSION_REDIRECT_DELAY).await;
            return Some(Redirect::Login);
        }

        None
    }

    /// Last-resort hook for errors no call site claimed.
    pub fn handle_unexpected(&self, error: &dyn std::error::Error) {
        tracing::error!(error = %error, "unhandled failure reached the global handler");
        self.notifications.unexpected();
    }

    /// Connectivity lost: show the persistent offline banner.
    pub fn connectivity_lost(&self) {
        self.notifications
            .network_banner("You are currently offline. Some features may not work.");
    }

    /// Connectivity restored: announce it and flush the retry queue once.
    pub async fn connectivity_restored(&self) -> FlushReport {
        self.notifications
            .success("Connection restored. Retrying failed requests...");

        let report = self.retry.flush().await;
        if report.recovered > 0 {
            self.notifications
                .success("Failed request completed successfully.");
        }
        for url in &report.exhausted {
            self.notifications.error(format!(
                "Failed to complete request to {url} after {} attempts.",
                self.config.retry_max_attempts
            ));
        }
        report
    }

    /// Flips a vendor's saved state and returns the new membership.
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] when the collection cannot be persisted.
    pub fn toggle_favorite(&self, vendor: &Vendor) -> Result<bool, AppError> {
        Ok(self
            .favorites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .toggle(vendor)?)
    }

    #[must_use]
    pub fn favorite_count(&self) -> usize {
        self.favorites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .count()
    }

    #[must_use]
    pub fn is_favorited(&self, vendor_id: &str) -> bool {
        self.favorites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_favorited(vendor_id)
    }

    /// Travel search defaults read at startup.
    #[must_use]
    pub fn preferences(&self) -> &TravelPreferences {
        &self.preferences
    }
}
