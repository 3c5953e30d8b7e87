//! User-visible notifications.
//!
//! State containers report the outcome of every user action through a
//! [`Notifier`]. Delivery is fire-and-forget: a sink has no way to report
//! failure back to the operation that produced the message.

use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Default,
    /// A failed action.
    Destructive,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    /// An informational notification.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    /// A notification for a failed action.
    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            ..Self::new(title, description)
        }
    }

    /// Whether this reports a failure.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

/// A sink for notifications.
pub trait Notifier: Send + Sync {
    /// Deliver a notification.
    fn notify(&self, notification: Notification);
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Default => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
            Variant::Destructive => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
        }
    }
}

/// Delivers each notification to several sinks, in order.
#[derive(Clone, Default)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    /// Fan out to `sinks`.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Notifier>>) -> Self {
        Self { sinks }
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&self, notification: Notification) {
        for sink in &self.sinks {
            sink.notify(notification.clone());
        }
    }
}

/// Keeps every notification in memory until drained.
///
/// Front-ends use this to render the messages produced by one command;
/// tests use it to assert on them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|mut received| std::mem::take(&mut *received))
            .unwrap_or_default()
    }

    /// The most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.received
            .lock()
            .ok()
            .and_then(|received| received.last().cloned())
    }

    /// Number of notifications recorded and not yet drained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.received.lock().map_or(0, |received| received.len())
    }

    /// Whether nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(title = %notification.title, "Notification recorded");
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}
