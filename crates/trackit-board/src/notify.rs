/*
[INPUT]:  Outcome messages from refreshes and mutations
[OUTPUT]: User-visible success/error notifications
[POS]:    Port - notification channel consumed by the sync controller
[UPDATE]: When adding notification sinks or message kinds
*/

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(message) | Notification::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }
}

/// Sink for user-visible outcomes. How they are displayed is up to the implementor.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Writes notifications to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "trackit::notify", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "trackit::notify", "{message}");
    }
}

/// Forwards notifications to a channel so a front end can display them.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, notification: Notification) {
        // Receiver gone means nobody is displaying; mirror to the log instead.
        if let Err(mpsc::error::SendError(notification)) = self.tx.send(notification) {
            match notification {
                Notification::Success(message) => TracingNotifier.success(&message),
                Notification::Error(message) => TracingNotifier.error(&message),
            }
        }
    }
}

impl Notifier for ChannelNotifier {
    fn success(&self, message: &str) {
        self.send(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.send(Notification::Error(message.to_string()));
    }
}
