//! Request/response envelopes for the backend REST API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use reloc_core::{BookingStatus, LeadStatus, User, UserType};

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Registration payload. The trust/profession fields apply to healthcare
/// workers, the business fields to providers; absent fields are omitted from
/// the JSON body.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nhs_trust: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<reloc_core::Vendor>,
}

#[derive(Debug, Default, Serialize)]
pub struct AdvancedSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_min: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AdvancedSearchResponse {
    #[serde(default)]
    pub services: Vec<reloc_core::Vendor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Regions, trusts, and categories, fetched jointly at startup.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub regions: Vec<MetaItem>,
    pub trusts: Vec<MetaItem>,
    pub categories: Vec<MetaItem>,
}

#[derive(Debug, Serialize)]
pub struct TrackEventRequest {
    pub event_type: String,
    pub vendor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingRequest {
    pub service_id: String,
    pub booking_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingResponse {
    pub booking_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateIntentRequest {
    /// Amount in pence.
    pub amount: u64,
    pub service_id: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentResponse {
    pub client_secret: String,
    pub intent_id: String,
}

#[derive(Debug, Serialize)]
pub struct AcceptLeadRequest {
    pub vendor_phone: String,
}

#[derive(Debug, Deserialize)]
pub struct AcceptLeadResponse {
    pub customer_name: String,
    pub service_type: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDataType {
    Users,
    Services,
    Bookings,
    Analytics,
    Leads,
    Commissions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

#[derive(Debug, Serialize)]
pub struct ExportRequest {
    pub data_type: ExportDataType,
    pub format: ExportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ExportStartResponse {
    pub job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportJobState {
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Deserialize)]
pub struct ExportStatus {
    pub status: ExportJobState,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// FastAPI-style error body; the `detail` string becomes the user-facing
/// message when present.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
