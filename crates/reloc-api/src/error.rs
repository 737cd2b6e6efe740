use thiserror::Error;

/// Errors surfaced by the backend gateway.
///
/// HTTP statuses are classified here, once, so feature code matches on
/// variants instead of status codes: 400 → [`ApiError::Validation`],
/// 401 → [`ApiError::Auth`], 403 → [`ApiError::Forbidden`],
/// 404 → [`ApiError::NotFound`], 429 → [`ApiError::RateLimited`], and
/// anything 5xx (or otherwise unexpected) → [`ApiError::Server`]. Transport
/// failures stay as [`ApiError::Http`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the input (HTTP 400).
    #[error("{message}")]
    Validation { message: String },

    /// Missing or expired session (HTTP 401).
    #[error("{message}")]
    Auth { message: String },

    /// The session lacks permission for this action (HTTP 403).
    #[error("{message}")]
    Forbidden { message: String },

    /// The resource does not exist (HTTP 404).
    #[error("{message}")]
    NotFound { message: String },

    /// The backend asked us to slow down (HTTP 429).
    #[error("{message}")]
    RateLimited { message: String },

    /// Backend-side failure (5xx) or an unclassified status.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Classifies a non-2xx status with the server-provided message.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => ApiError::Validation { message },
            401 => ApiError::Auth { message },
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            429 => ApiError::RateLimited { message },
            _ => ApiError::Server { status, message },
        }
    }

    /// `true` for transport-level failures (offline, timeout, connection
    /// reset) — the only class the retry queue accepts. HTTP-status failures
    /// reached the backend and must not be replayed blindly.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Http(_))
    }

    /// `true` when the session should be torn down (HTTP 401).
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}
