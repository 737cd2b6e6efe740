//! Admin data-export jobs: start, poll, deadline.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use reloc_api::types::{ExportJobState, ExportRequest};
use reloc_api::{ApiClient, ApiError};
use reloc_core::AppConfig;

use crate::loading::LoadingTracker;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Starting the job or checking its status failed; the poll is abandoned.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The backend reported the job itself as failed.
    #[error("export failed: {0}")]
    Failed(String),

    /// The job did not finish inside the deadline; it may still complete
    /// server-side.
    #[error("export did not finish within {0:?}")]
    TimedOut(Duration),
}

/// A completed export ready for download.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub download_url: String,
    pub filename: Option<String>,
}

/// Starts an export job and polls its status to completion.
pub struct ExportController {
    api: Arc<ApiClient>,
    poll_interval: Duration,
    deadline: Duration,
    loading: LoadingTracker,
}

impl ExportController {
    #[must_use]
    pub fn new(
        api: Arc<ApiClient>,
        poll_interval: Duration,
        deadline: Duration,
        loading: LoadingTracker,
    ) -> Self {
        Self {
            api,
            poll_interval,
            deadline,
            loading,
        }
    }

    #[must_use]
    pub fn from_config(api: Arc<ApiClient>, config: &AppConfig, loading: LoadingTracker) -> Self {
        Self::new(
            api,
            Duration::from_secs(config.export_poll_interval_secs),
            Duration::from_secs(config.export_timeout_secs),
            loading,
        )
    }

    /// Runs one export end to end. The loading indicator spans the whole
    /// poll, deadline included.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Api`] when the start call or a status check fails.
    /// - [`ExportError::Failed`] when the backend reports the job failed.
    /// - [`ExportError::TimedOut`] when the deadline elapses first.
    pub async fn run(&self, request: &ExportRequest) -> Result<ExportOutcome, ExportError> {
        let _guard = self.loading.start("export_poll");

        let started = self.api.start_export(request).await?;
        tracing::info!(job_id = started.job_id, "export job started");

        tokio::time::timeout(self.deadline, self.poll(&started.job_id))
            .await
            .map_err(|_| ExportError::TimedOut(self.deadline))?
    }

    async fn poll(&self, job_id: &str) -> Result<ExportOutcome, ExportError> {
        loop {
            tokio::time::sleep(self.poll_interval).await;

            let status = self.api.export_status(job_id).await?;
            match status.status {
                ExportJobState::Processing => {}
                ExportJobState::Completed => {
                    let download_url = status.download_url.ok_or_else(|| {
                        ExportError::Failed("completed without a download URL".to_owned())
                    })?;
                    tracing::info!(job_id, "export job completed");
                    return Ok(ExportOutcome {
                        download_url,
                        filename: status.filename,
                    });
                }
                ExportJobState::Failed => {
                    return Err(ExportError::Failed(
                        status.error.unwrap_or_else(|| "Unknown error".to_owned()),
                    ));
                }
            }
        }
    }
}
