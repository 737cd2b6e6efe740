//! Best-effort retry queue for network-failed requests.
//!
//! Only transport failures are eligible — an HTTP error status means the
//! backend saw the request, and replaying it blindly could double a side
//! effect. The queue drains once per connectivity-restored signal: entries
//! older than the staleness window are silently dropped, each surviving URL
//! is retried once, and a URL that keeps failing is abandoned after
//! `max_retries` lifetime attempts. Delivery is not guaranteed; duplicates
//! are possible when a request partially succeeded server-side before the
//! client observed the failure.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use reloc_core::AppConfig;

#[derive(Debug, Clone)]
struct QueuedRequest {
    url: String,
    queued_at: Instant,
}

/// What a flush did, for the notification layer.
#[derive(Debug, Default)]
pub struct FlushReport {
    /// Requests actually re-sent.
    pub retried: usize,
    /// Requests that reached the backend this time.
    pub recovered: usize,
    /// Entries discarded for exceeding the staleness window.
    pub dropped: usize,
    /// URLs abandoned after exhausting their attempts.
    pub exhausted: Vec<String>,
}

pub struct RetryQueue {
    http: reqwest::Client,
    max_retries: u32,
    max_age: Duration,
    entries: Mutex<Vec<QueuedRequest>>,
    attempts: Mutex<HashMap<String, u32>>,
}

impl RetryQueue {
    #[must_use]
    pub fn new(http: reqwest::Client, max_retries: u32, max_age: Duration) -> Self {
        Self {
            http,
            max_retries,
            max_age,
            entries: Mutex::new(Vec::new()),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn from_config(http: reqwest::Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            config.retry_max_attempts,
            Duration::from_secs(config.retry_max_age_secs),
        )
    }

    /// Queues a URL whose request failed at the transport level. URLs that
    /// have already burned through their attempts are not re-admitted.
    pub fn queue(&self, url: impl Into<String>) {
        self.queue_at(url.into(), Instant::now());
    }

    /// Test seam: queue an entry as if it had been waiting for `age` already.
    #[doc(hidden)]
    pub fn queue_with_age(&self, url: impl Into<String>, age: Duration) {
        let queued_at = Instant::now().checked_sub(age).unwrap_or_else(Instant::now);
        self.queue_at(url.into(), queued_at);
    }

    fn queue_at(&self, url: String, queued_at: Instant) {
        let attempts_used = *self
            .attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&url)
            .unwrap_or(&0);
        if attempts_used >= self.max_retries {
            tracing::warn!(url, "not queueing request; retry attempts exhausted");
            return;
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(QueuedRequest { url, queued_at });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains the queue, retrying each fresh entry once. Called when
    /// connectivity is restored.
    ///
    /// A retry counts as recovered when the request reaches the backend at
    /// all — an HTTP error status is still a delivery, and classifying it is
    /// the caller's business on the next explicit action.
    pub async fn flush(&self) -> FlushReport {
        let pending = std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        let mut report = FlushReport::default();

        for request in pending {
            if request.queued_at.elapsed() > self.max_age {
                tracing::debug!(url = request.url, "dropping stale queued request");
                report.dropped += 1;
                continue;
            }

            let attempts_used = {
                let mut attempts = self
                    .attempts
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                let counter = attempts.entry(request.url.clone()).or_insert(0);
                *counter += 1;
                *counter
            };

            report.retried += 1;
            match self.http.get(&request.url).send().await {
                Ok(_) => {
                    report.recovered += 1;
                    self.attempts
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .remove(&request.url);
                }
                Err(e) => {
                    if attempts_used < self.max_retries {
                        tracing::warn!(url = request.url, error = %e, "retry failed; re-queueing");
                        self.entries
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(request);
                    } else {
                        tracing::warn!(
                            url = request.url,
                            attempts = attempts_used,
                            "abandoning request after exhausting retries"
                        );
                        report.exhausted.push(request.url);
                    }
                }
            }
        }

        report
    }
}
