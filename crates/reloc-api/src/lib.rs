//! HTTP gateway to the JustRelocation backend REST API.
//!
//! Every feature area goes through the one [`ApiClient`] here: it attaches
//! the bearer token when a session exists, serializes JSON bodies, and maps
//! non-2xx statuses onto the [`ApiError`] taxonomy so callers never look at
//! raw status codes. The [`SessionManager`] drives the auth lifecycle and the
//! [`RetryQueue`] gives network-failed requests one bounded second chance.

mod bookings;
mod client;
mod error;
mod portal;
mod retry;
mod session;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use retry::{FlushReport, RetryQueue};
pub use session::{AuthState, SessionManager};
