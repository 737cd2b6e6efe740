//! Vendor-portal and admin endpoints.

use reloc_core::{Lead, LeadStatus, Vendor};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    AcceptLeadRequest, AcceptLeadResponse, ExportRequest, ExportStartResponse, ExportStatus,
    LoginRequest, LoginResponse, UpdateLeadStatusRequest,
};

impl ApiClient {
    /// Lists the signed-in vendor's leads.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn vendor_leads(&self) -> Result<Vec<Lead>, ApiError> {
        self.get_json("/vendor/leads").await
    }

    /// Fetches a single lead by id.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the lead is gone, otherwise any
    /// [`ApiError`] from the shared request path.
    pub async fn vendor_lead(&self, lead_id: &str) -> Result<Lead, ApiError> {
        self.get_json(&format!("/vendor/leads/{lead_id}")).await
    }

    /// Claims a lead for the vendor identified by phone number.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the lead is no longer available, otherwise
    /// any [`ApiError`] from the shared request path.
    pub async fn accept_lead(
        &self,
        lead_id: &str,
        vendor_phone: &str,
    ) -> Result<AcceptLeadResponse, ApiError> {
        let request = AcceptLeadRequest {
            vendor_phone: vendor_phone.to_owned(),
        };
        self.post_json(&format!("/vendor/leads/{lead_id}/accept"), &request)
            .await
    }

    /// Pushes a lead status change. Lifecycle legality is the portal
    /// controller's job; this is the bare wire call.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn update_lead_status(
        &self,
        lead_id: &str,
        status: LeadStatus,
    ) -> Result<(), ApiError> {
        let request = UpdateLeadStatusRequest { status };
        self.put_json_unit(&format!("/vendor/leads/{lead_id}/status"), &request)
            .await
    }

    /// Admin sign-in. On success the returned token is installed on this
    /// client for the admin endpoints below.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response: LoginResponse = self.post_json("/admin/login", &request).await?;
        self.set_token(response.access_token.clone());
        Ok(response)
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn admin_list_vendors(&self) -> Result<Vec<Vendor>, ApiError> {
        self.get_json("/admin/vendors").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn admin_create_vendor(&self, vendor: &Vendor) -> Result<Vendor, ApiError> {
        self.post_json("/admin/vendors", vendor).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn admin_update_vendor(
        &self,
        vendor_id: &str,
        vendor: &Vendor,
    ) -> Result<(), ApiError> {
        self.put_json_unit(&format!("/admin/vendors/{vendor_id}"), vendor)
            .await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn admin_delete_vendor(&self, vendor_id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/admin/vendors/{vendor_id}"))
            .await
    }

    /// Starts an asynchronous export job and returns its id.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn start_export(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportStartResponse, ApiError> {
        self.post_json("/admin/export", request).await
    }

    /// Reads the current state of an export job.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn export_status(&self, job_id: &str) -> Result<ExportStatus, ApiError> {
        self.get_json(&format!("/admin/export/status/{job_id}"))
            .await
    }
}
