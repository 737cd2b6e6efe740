//! Failure-to-notification mapping and the notification center.
//!
//! Every [`ApiError`] maps to one user-visible notification with a fixed
//! message, icon, and auto-dismiss duration. Network banners are persistent
//! (no duration) and stay up until connectivity is handled; everything else
//! dismisses itself.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use reloc_api::ApiError;

/// Auto-dismiss window for ordinary errors and warnings.
pub const ERROR_DURATION: Duration = Duration::from_secs(5);
/// Longer window for backend-side failures.
pub const SERVER_ERROR_DURATION: Duration = Duration::from_secs(8);
/// Short window for confirmations.
pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Warning,
    Success,
    Info,
    Network,
}

impl NotificationKind {
    /// Icon class the embedding layer renders next to the message.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Error => "fas fa-exclamation-circle",
            NotificationKind::Warning => "fas fa-exclamation-triangle",
            NotificationKind::Success => "fas fa-check-circle",
            NotificationKind::Info => "fas fa-info-circle",
            NotificationKind::Network => "fas fa-wifi",
        }
    }
}

/// One user-visible notification. `duration: None` means persistent.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub duration: Option<Duration>,
}

impl Notification {
    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }
}

/// Collects notifications for the embedding layer to display.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    fn push(&self, kind: NotificationKind, message: String, duration: Option<Duration>) -> Uuid {
        let id = Uuid::new_v4();
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                id,
                kind,
                message,
                duration,
            });
        id
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Error, message.into(), Some(ERROR_DURATION))
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.push(
            NotificationKind::Warning,
            message.into(),
            Some(ERROR_DURATION),
        )
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(
            NotificationKind::Success,
            message.into(),
            Some(SUCCESS_DURATION),
        )
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Info, message.into(), Some(ERROR_DURATION))
    }

    /// Persistent connectivity banner; stays until dismissed explicitly.
    pub fn network_banner(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Network, message.into(), None)
    }

    /// Maps a gateway failure to its notification.
    pub fn report(&self, error: &ApiError) -> Uuid {
        match error {
            ApiError::Validation { .. } => {
                self.warning("Please check your input and try again.")
            }
            ApiError::Auth { .. } => self.error("Your session has expired. Please log in again."),
            ApiError::Forbidden { .. } => {
                self.error("You do not have permission to perform this action.")
            }
            ApiError::NotFound { .. } => self.error("The requested resource was not found."),
            ApiError::RateLimited { .. } => {
                self.error("Too many requests. Please wait a moment and try again.")
            }
            ApiError::Server { status: 500, .. } => self.push(
                NotificationKind::Error,
                "Server is temporarily unavailable. Please try again in a few moments.".to_owned(),
                Some(SERVER_ERROR_DURATION),
            ),
            ApiError::Server { status, .. } => {
                self.error(format!("Server error ({status}). Please try again later."))
            }
            ApiError::Http(_) => self.network_banner("Connection problem. Request queued for retry."),
            ApiError::Deserialize { .. } => {
                self.error("An unexpected error occurred. Please try again.")
            }
        }
    }

    /// Last-resort path for truly unexpected failures.
    pub fn unexpected(&self) -> Uuid {
        self.error("Something went wrong. Please refresh the page and try again.")
    }

    /// Removes one notification (the user closed it, or a banner resolved).
    pub fn dismiss(&self, id: Uuid) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|n| n.id != id);
    }

    /// Takes everything currently queued, leaving the center empty.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self.items.lock().unwrap_or_else(PoisonError::into_inner),
        )
    }

    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(center: &NotificationCenter) -> Notification {
        let mut items = center.drain();
        assert_eq!(items.len(), 1);
        items.pop().unwrap()
    }

    #[test]
    fn validation_maps_to_a_warning_with_the_input_copy() {
        let center = NotificationCenter::default();
        center.report(&ApiError::from_status(400, "bad".to_owned()));
        let n = single(&center);
        assert_eq!(n.kind, NotificationKind::Warning);
        assert_eq!(n.message, "Please check your input and try again.");
        assert_eq!(n.duration, Some(ERROR_DURATION));
        assert_eq!(n.icon(), "fas fa-exclamation-triangle");
    }

    #[test]
    fn expired_session_uses_the_login_copy() {
        let center = NotificationCenter::default();
        center.report(&ApiError::from_status(401, String::new()));
        let n = single(&center);
        assert_eq!(n.message, "Your session has expired. Please log in again.");
        assert_eq!(n.kind, NotificationKind::Error);
    }

    #[test]
    fn a_500_gets_the_longer_window_and_other_5xx_the_generic_copy() {
        let center = NotificationCenter::default();
        center.report(&ApiError::from_status(500, String::new()));
        let n = single(&center);
        assert_eq!(
            n.message,
            "Server is temporarily unavailable. Please try again in a few moments."
        );
        assert_eq!(n.duration, Some(SERVER_ERROR_DURATION));

        center.report(&ApiError::from_status(503, String::new()));
        let n = single(&center);
        assert_eq!(n.message, "Server error (503). Please try again later.");
        assert_eq!(n.duration, Some(ERROR_DURATION));
    }

    #[test]
    fn rate_limit_and_permission_copies() {
        let center = NotificationCenter::default();
        center.report(&ApiError::from_status(429, String::new()));
        assert_eq!(
            single(&center).message,
            "Too many requests. Please wait a moment and try again."
        );
        center.report(&ApiError::from_status(403, String::new()));
        assert_eq!(
            single(&center).message,
            "You do not have permission to perform this action."
        );
    }

    #[test]
    fn network_banner_is_persistent() {
        let center = NotificationCenter::default();
        center.network_banner("You are currently offline. Some features may not work.");
        let n = single(&center);
        assert_eq!(n.kind, NotificationKind::Network);
        assert!(n.duration.is_none());
        assert_eq!(n.icon(), "fas fa-wifi");
    }

    #[test]
    fn success_auto_dismisses_after_three_seconds() {
        let center = NotificationCenter::default();
        center.success("Connection restored. Retrying failed requests...");
        assert_eq!(single(&center).duration, Some(SUCCESS_DURATION));
    }

    #[test]
    fn dismiss_removes_only_the_given_notification() {
        let center = NotificationCenter::default();
        let keep = center.error("first");
        let gone = center.error("second");
        center.dismiss(gone);
        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, keep);
    }
}
