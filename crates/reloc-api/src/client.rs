//! The shared request/response core and the catalog endpoints.
//!
//! The original product duplicated this fetch wrapper in every feature area;
//! here it exists once and the feature endpoints are thin typed methods on
//! top of it.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;

use reloc_core::{AppConfig, Hospital, Vendor};

use crate::error::ApiError;
use crate::types::{
    AdvancedSearchRequest, AdvancedSearchResponse, ErrorBody, MetaItem, Metadata, SearchResponse,
    TrackEventRequest,
};

/// Client for the JustRelocation backend REST API.
///
/// Holds the HTTP client, the base URL, and the current bearer token. Use
/// [`ApiClient::new`] with the application config for production or
/// [`ApiClient::with_base_url`] to point at a mock server in tests.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Mutex<Option<String>>,
}

impl ApiClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: Mutex::new(None),
        })
    }

    /// Installs the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.into());
    }

    /// Drops the bearer token; subsequent requests go out anonymous.
    pub fn clear_token(&self) {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request, classifies non-2xx statuses, and parses the body.
    ///
    /// The backend reports failures as `{"detail": "..."}`; that message is
    /// carried into the error variant when present.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(builder).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Like [`ApiClient::execute`] but discards the response body, for
    /// endpoints whose payload the client does not consume.
    pub(crate) async fn execute_unit(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.execute_raw(builder).await.map(|_| ())
    }

    async fn execute_raw(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = self.authorize(builder).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            });
        Err(ApiError::from_status(status.as_u16(), message))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(path)), path).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(path)).query(query), path)
            .await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path)).json(body), path)
            .await
    }

    pub(crate) async fn put_json_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute_unit(self.http.put(self.url(path)).json(body))
            .await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path)), path).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        self.execute_unit(self.http.delete(self.url(path))).await
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Backend liveness probe.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn health_check(&self) -> Result<(), ApiError> {
        self.execute_unit(self.http.get(self.url("/health"))).await
    }

    /// Searches services by free-text location and category.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn search_services(
        &self,
        location: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Vendor>, ApiError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(category) = category {
            query.push(("category", category));
        }
        if let Some(location) = location {
            query.push(("location", location));
        }
        let response: SearchResponse = self.get_json_query("/services/search", &query).await?;
        Ok(response.results)
    }

    /// Structured search with distance/price/rating filters.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn advanced_search(
        &self,
        request: &AdvancedSearchRequest,
    ) -> Result<Vec<Vendor>, ApiError> {
        let response: AdvancedSearchResponse = self
            .post_json("/services/advanced-search", request)
            .await?;
        Ok(response.services)
    }

    /// Lists vendors, optionally filtered (`category`, `trust`, `region`).
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn list_vendors(&self, filters: &[(&str, &str)]) -> Result<Vec<Vendor>, ApiError> {
        self.get_json_query("/vendors", filters).await
    }

    /// Fetches a single vendor by id.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the vendor does not exist, otherwise any
    /// [`ApiError`] from the shared request path.
    pub async fn get_vendor(&self, vendor_id: &str) -> Result<Vendor, ApiError> {
        self.get_json(&format!("/vendors/{vendor_id}")).await
    }

    /// Lists the NHS trusts/hospital groups shown in the directory.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>, ApiError> {
        self.get_json("/hospitals").await
    }

    /// Loads regions, trusts, and categories. The three requests are issued
    /// together and awaited jointly; no ordering between them is guaranteed.
    ///
    /// # Errors
    ///
    /// The first [`ApiError`] from any of the three requests.
    pub async fn load_metadata(&self) -> Result<Metadata, ApiError> {
        let (regions, trusts, categories) = tokio::try_join!(
            self.get_json::<Vec<MetaItem>>("/meta/regions"),
            self.get_json::<Vec<MetaItem>>("/meta/trusts"),
            self.get_json::<Vec<MetaItem>>("/meta/categories"),
        )?;
        Ok(Metadata {
            regions,
            trusts,
            categories,
        })
    }

    /// Records a click/lead analytics event.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path; callers generally log
    /// and ignore failures here.
    pub async fn track_event(
        &self,
        event_type: &str,
        vendor_id: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        let request = TrackEventRequest {
            event_type: event_type.to_owned(),
            vendor_id: vendor_id.to_owned(),
            metadata,
        };
        self.execute_unit(self.http.post(self.url("/events")).json(&request))
            .await
    }
}
