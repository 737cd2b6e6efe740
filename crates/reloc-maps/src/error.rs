use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoding API answered with a non-OK status string.
    #[error("geocoding API error: {0}")]
    Api(String),

    /// The query matched nothing.
    #[error("no geocoding results for the query")]
    NoResults,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
