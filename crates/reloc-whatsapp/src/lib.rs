//! WhatsApp Business Cloud API adapter.
//!
//! Outbound sends are direct third-party calls, deliberately outside the
//! backend gateway's retry queue: [`WhatsAppClient::dispatch`] logs failures
//! and swallows them. Inbound handling is split into pure pieces — keyword
//! [`categorize`](categorize::categorize) with an explicit precedence order,
//! canned reply [`templates`], and [`route`](route::route) decisions — so the
//! application layer owns all backend I/O.

mod categorize;
mod client;
mod error;
mod route;
pub mod templates;
pub mod types;

pub use categorize::{categorize, MessageCategory};
pub use client::{normalize_uk_number, valid_uk_number, wa_me_link, WhatsAppClient};
pub use error::WhatsAppError;
pub use route::{route, InboundAction};
