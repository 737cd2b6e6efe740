//! Vendor portal: leads, pipeline, and WhatsApp inbound dispatch.
//!
//! Status changes are checked against the lead lifecycle before the backend
//! is called, so the wire never sees an illegal move. Inbound WhatsApp texts
//! are routed by the pure adapter; executing the decision — backend calls and
//! replies — happens here.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use thiserror::Error;

use reloc_api::{ApiClient, ApiError};
use reloc_core::{Lead, LeadStatus};
use reloc_whatsapp::{route, templates, InboundAction, WhatsAppClient};

use crate::loading::LoadingTracker;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested move is not a legal lifecycle step.
    #[error("cannot move lead from {from} to {to}")]
    IllegalTransition { from: LeadStatus, to: LeadStatus },

    /// The lead is not in the loaded list.
    #[error("unknown lead: {0}")]
    UnknownLead(String),
}

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub new_leads: usize,
    /// Contacted or quoted.
    pub in_progress: usize,
    pub won: usize,
    pub lost: usize,
    /// Won leads as a percentage of all leads; 0 when there are none.
    pub conversion_rate: f64,
}

pub struct PortalController {
    api: Arc<ApiClient>,
    whatsapp: Option<Arc<WhatsAppClient>>,
    loading: LoadingTracker,
    leads: Mutex<Vec<Lead>>,
}

impl PortalController {
    #[must_use]
    pub fn new(
        api: Arc<ApiClient>,
        whatsapp: Option<Arc<WhatsAppClient>>,
        loading: LoadingTracker,
    ) -> Self {
        Self {
            api,
            whatsapp,
            loading,
            leads: Mutex::new(Vec::new()),
        }
    }

    /// Loads the signed-in vendor's leads.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the leads endpoint.
    pub async fn load_leads(&self) -> Result<Vec<Lead>, ApiError> {
        let _guard = self.loading.start("leads");
        let leads = self.api.vendor_leads().await?;
        *self.leads.lock().unwrap_or_else(PoisonError::into_inner) = leads.clone();
        Ok(leads)
    }

    #[must_use]
    pub fn leads(&self) -> Vec<Lead> {
        self.leads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Moves a lead along its lifecycle, backend included.
    ///
    /// # Errors
    ///
    /// - [`PortalError::UnknownLead`] when the lead is not loaded.
    /// - [`PortalError::IllegalTransition`] when the move breaks the chain;
    ///   nothing is sent to the backend.
    /// - [`PortalError::Api`] when the backend update fails; the local copy
    ///   is left unchanged.
    pub async fn update_status(
        &self,
        lead_id: &str,
        next: LeadStatus,
    ) -> Result<(), PortalError> {
        let current = self
            .leads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|l| l.id == lead_id)
            .map(|l| l.status)
            .ok_or_else(|| PortalError::UnknownLead(lead_id.to_owned()))?;

        if !current.can_transition(next) {
            return Err(PortalError::IllegalTransition {
                from: current,
                to: next,
            });
        }

        self.api.update_lead_status(lead_id, next).await?;

        let mut leads = self.leads.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lead) = leads.iter_mut().find(|l| l.id == lead_id) {
            lead.status = next;
        }
        tracing::debug!(lead_id, status = %next, "lead status updated");
        Ok(())
    }

    /// Dashboard headline numbers over the loaded leads.
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        let leads = self.leads.lock().unwrap_or_else(PoisonError::into_inner);
        let total = leads.len();
        let count = |status: LeadStatus| leads.iter().filter(|l| l.status == status).count();

        let won = count(LeadStatus::Won);
        #[allow(clippy::cast_precision_loss)]
        let conversion_rate = if total == 0 {
            0.0
        } else {
            won as f64 / total as f64 * 100.0
        };

        DashboardStats {
            new_leads: count(LeadStatus::New),
            in_progress: count(LeadStatus::Contacted) + count(LeadStatus::Quoted),
            won,
            lost: count(LeadStatus::Lost),
            conversion_rate,
        }
    }

    /// Pipeline columns in lifecycle order.
    #[must_use]
    pub fn pipeline(&self) -> Vec<(LeadStatus, Vec<Lead>)> {
        let leads = self.leads.lock().unwrap_or_else(PoisonError::into_inner);
        [
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Quoted,
            LeadStatus::Won,
            LeadStatus::Lost,
        ]
        .into_iter()
        .map(|status| {
            (
                status,
                leads.iter().filter(|l| l.status == status).cloned().collect(),
            )
        })
        .collect()
    }

    /// Routes one inbound WhatsApp text and executes the decision: backend
    /// calls plus the canned reply. Replies are fire-and-forget; the routing
    /// decision is returned for the embedding layer.
    pub async fn handle_inbound(&self, from: &str, text: &str) -> InboundAction {
        let action = route(text);
        tracing::debug!(from, ?action, "inbound message routed");

        match &action {
            InboundAction::AcceptLead { lead_id } => self.accept_lead(from, lead_id).await,
            InboundAction::AcceptLeadMissingId => {
                self.reply(from, templates::missing_lead_id_reply("ACCEPT"))
                    .await;
            }
            InboundAction::LeadInfo { lead_id } => self.send_lead_info(from, lead_id).await,
            InboundAction::LeadInfoMissingId => {
                self.reply(from, templates::missing_lead_id_reply("INFO"))
                    .await;
            }
            InboundAction::StatusCheck => {
                let stats = self.stats();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let conversion = stats.conversion_rate.round() as u32;
                self.reply(
                    from,
                    templates::status_summary(
                        stats.new_leads + stats.in_progress,
                        stats.won,
                        conversion,
                    ),
                )
                .await;
            }
            InboundAction::Help => self.reply(from, templates::help_message()).await,
            InboundAction::BookingInquiry => {
                self.reply(from, templates::booking_inquiry_reply()).await;
            }
            InboundAction::Emergency => {
                tracing::warn!(from, "emergency message received; prioritizing");
                self.reply(from, templates::emergency_reply()).await;
            }
            InboundAction::Cancel => self.reply(from, templates::cancel_reply()).await,
            InboundAction::General => {
                self.reply(from, templates::auto_reply(&Utc::now())).await;
            }
        }

        action
    }

    async fn accept_lead(&self, from: &str, lead_id: &str) {
        match self.api.accept_lead(lead_id, from).await {
            Ok(accepted) => {
                self.reply(
                    from,
                    templates::lead_accepted_reply(
                        lead_id,
                        &accepted.customer_name,
                        &accepted.service_type,
                        accepted.customer_phone.as_deref(),
                    ),
                )
                .await;
                if let Some(customer_phone) = &accepted.customer_phone {
                    self.reply(
                        customer_phone,
                        templates::lead_accepted_customer_notice(lead_id, &accepted.service_type),
                    )
                    .await;
                }
            }
            Err(ApiError::NotFound { .. }) => {
                self.reply(from, templates::lead_unavailable_reply(lead_id))
                    .await;
            }
            Err(e) => {
                tracing::warn!(lead_id, error = %e, "lead acceptance failed");
                self.reply(
                    from,
                    "Error processing your request. Please try again later.".to_owned(),
                )
                .await;
            }
        }
    }

    async fn send_lead_info(&self, from: &str, lead_id: &str) {
        match self.api.vendor_lead(lead_id).await {
            Ok(lead) => self.reply(from, templates::lead_info_reply(&lead)).await,
            Err(ApiError::NotFound { .. }) => {
                self.reply(from, templates::lead_unavailable_reply(lead_id))
                    .await;
            }
            Err(e) => {
                tracing::warn!(lead_id, error = %e, "lead info lookup failed");
                self.reply(
                    from,
                    "Error processing your request. Please try again later.".to_owned(),
                )
                .await;
            }
        }
    }

    async fn reply(&self, to: &str, body: impl Into<String>) {
        let body = body.into();
        match &self.whatsapp {
            Some(client) => {
                client
                    .dispatch(to, reloc_whatsapp::types::MessagePayload::text(body))
                    .await;
            }
            None => tracing::debug!(to, "no messaging client configured; reply dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use reloc_core::Urgency;

    use super::*;

    fn lead(id: &str, status: LeadStatus) -> Lead {
        Lead {
            id: id.to_owned(),
            customer_name: format!("Customer {id}"),
            email: None,
            phone: None,
            hospital: "St Thomas' Hospital".to_owned(),
            service_type: "Housing".to_owned(),
            budget: "£1,200-£1,500".to_owned(),
            preferred_date: None,
            location: "Central London".to_owned(),
            notes: None,
            urgency: Urgency::Normal,
            status,
            match_score: 80,
        }
    }

    fn controller(leads: Vec<Lead>) -> PortalController {
        let api = Arc::new(
            ApiClient::with_base_url("http://127.0.0.1:9", 1, "justrelocation-test/0.1").unwrap(),
        );
        let controller = PortalController::new(api, None, LoadingTracker::default());
        *controller.leads.lock().unwrap() = leads;
        controller
    }

    #[test]
    fn stats_count_statuses_and_compute_conversion() {
        let controller = controller(vec![
            lead("1", LeadStatus::New),
            lead("2", LeadStatus::Contacted),
            lead("3", LeadStatus::Quoted),
            lead("4", LeadStatus::Won),
            lead("5", LeadStatus::Lost),
        ]);
        let stats = controller.stats();
        assert_eq!(stats.new_leads, 1);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.won, 1);
        assert_eq!(stats.lost, 1);
        assert!((stats.conversion_rate - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_with_no_leads_are_all_zero() {
        let stats = controller(vec![]).stats();
        assert_eq!(stats.new_leads, 0);
        assert!((stats.conversion_rate).abs() < f64::EPSILON);
    }

    #[test]
    fn pipeline_buckets_follow_lifecycle_order() {
        let controller = controller(vec![
            lead("1", LeadStatus::Won),
            lead("2", LeadStatus::New),
            lead("3", LeadStatus::New),
        ]);
        let pipeline = controller.pipeline();
        let statuses: Vec<LeadStatus> = pipeline.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            statuses,
            [
                LeadStatus::New,
                LeadStatus::Contacted,
                LeadStatus::Quoted,
                LeadStatus::Won,
                LeadStatus::Lost
            ]
        );
        assert_eq!(pipeline[0].1.len(), 2);
        assert_eq!(pipeline[3].1.len(), 1);
    }

    #[tokio::test]
    async fn illegal_transitions_are_rejected_before_the_backend() {
        let controller = controller(vec![lead("1", LeadStatus::New)]);
        let err = controller
            .update_status("1", LeadStatus::Won)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PortalError::IllegalTransition {
                from: LeadStatus::New,
                to: LeadStatus::Won
            }
        ));
        assert_eq!(controller.leads()[0].status, LeadStatus::New);
    }

    #[tokio::test]
    async fn unknown_leads_are_rejected() {
        let controller = controller(vec![]);
        let err = controller
            .update_status("ghost", LeadStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::UnknownLead(ref id) if id == "ghost"));
    }
}
