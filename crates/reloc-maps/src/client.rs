//! REST geocoding client (forward and reverse).

use std::time::Duration;

use crate::error::MapsError;
use crate::types::{Coordinates, GeocodeResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeocodingClient {
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str) -> Result<Self, MapsError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, MapsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    async fn geocode_request(&self, query: &[(&str, &str)]) -> Result<GeocodeResponse, MapsError> {
        let url = format!("{}/geocode/json", self.base_url);
        let mut params: Vec<(&str, &str)> = query.to_vec();
        params.push(("key", &self.api_key));

        let response = self.http.get(&url).query(&params).send().await?;
        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
                context: url,
                source: e,
            })?;

        match parsed.status.as_str() {
            "OK" => Ok(parsed),
            "ZERO_RESULTS" => Err(MapsError::NoResults),
            other => Err(MapsError::Api(other.to_owned())),
        }
    }

    /// Resolves a free-text address to coordinates and the canonical address.
    ///
    /// # Errors
    ///
    /// - [`MapsError::NoResults`] when nothing matches.
    /// - [`MapsError::Api`] on a non-OK API status.
    /// - [`MapsError::Http`] / [`MapsError::Deserialize`] on transport or
    ///   parse failures.
    pub async fn geocode(&self, address: &str) -> Result<(Coordinates, String), MapsError> {
        let response = self.geocode_request(&[("address", address)]).await?;
        response
            .results
            .into_iter()
            .next()
            .map(|r| (r.geometry.location, r.formatted_address))
            .ok_or(MapsError::NoResults)
    }

    /// Resolves coordinates to the nearest formatted address.
    ///
    /// # Errors
    ///
    /// Same as [`GeocodingClient::geocode`].
    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<String, MapsError> {
        let latlng = format!("{lat},{lng}");
        let response = self.geocode_request(&[("latlng", &latlng)]).await?;
        response
            .results
            .into_iter()
            .next()
            .map(|r| r.formatted_address)
            .ok_or(MapsError::NoResults)
    }
}
