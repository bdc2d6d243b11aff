//! Bounded, non-blocking outbox for notification events

use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use bo_shared::utils::mask_email;

use crate::domain::events::NotificationEvent;

/// Fire-and-forget sink for notification events
pub trait NotificationPublisher: Send + Sync {
    /// Never blocks and never fails the caller
    fn publish(&self, event: NotificationEvent);
}

/// Sending half of the notification channel
#[derive(Clone)]
pub struct Outbox {
    sender: mpsc::Sender<NotificationEvent>,
}

/// Receiving half, owned by the worker
pub struct OutboxReceiver {
    pub(crate) receiver: mpsc::Receiver<NotificationEvent>,
}

impl Outbox {
    /// Create an outbox holding at most `capacity` undelivered events
    pub fn channel(capacity: usize) -> (Self, OutboxReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, OutboxReceiver { receiver })
    }
}

impl NotificationPublisher for Outbox {
    fn publish(&self, event: NotificationEvent) {
        let name = event.name();
        let to = mask_email(&event.recipient().email);
        match self.sender.try_send(event) {
            Ok(()) => debug!(event = name, to = %to, "Notification queued"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(event = name, to = %to, "Notification outbox full, dropping event")
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(event = name, to = %to, "Notification outbox closed, dropping event")
            }
        }
    }
}

/// Keeps published events in memory for assertions
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl NotificationPublisher for RecordingPublisher {
    fn publish(&self, event: NotificationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
