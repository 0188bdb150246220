//! # Notifications
//!
//! The toast side-channel. Commands call a [`Notifier`] after a mutation
//! succeeds; the stores themselves never notify.
//!
//! ```text
//! command ──► store.dispatch(..) ──► ok ──► notifier.notify("Added to Cart")
//! ```

use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// How a toast is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Destructive,
}

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Receiver of toast notifications (implemented by the view layer).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Discards every notification.
#[derive(Debug, Default)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Writes notifications to the log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            title = %notification.title,
            severity = ?notification.severity,
            "{}",
            notification.description
        );
    }
}

/// Queues notifications until the view drains them.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    queue: Mutex<Vec<Notification>>,
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *queue)
    }
}

impl Notifier for QueuedNotifier {
    fn notify(&self, notification: &Notification) {
        TracingNotifier.notify(notification);
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
