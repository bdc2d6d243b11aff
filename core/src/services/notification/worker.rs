//! Background delivery of queued notifications

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use bo_shared::utils::mask_email;
use bo_shared::NotificationConfig;

use crate::domain::events::NotificationEvent;

use super::outbox::OutboxReceiver;
use super::sender::EmailSender;
use super::templates;

/// Bounded retry with doubling delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Drains the outbox until every publisher has been dropped
pub struct NotificationWorker {
    receiver: OutboxReceiver,
    sender: Arc<dyn EmailSender>,
    policy: RetryPolicy,
}

impl NotificationWorker {
    pub fn new(receiver: OutboxReceiver, sender: Arc<dyn EmailSender>, policy: RetryPolicy) -> Self {
        Self {
            receiver,
            sender,
            policy,
        }
    }

    pub async fn run(mut self) {
        info!("Notification worker started");
        while let Some(event) = self.receiver.receiver.recv().await {
            self.deliver(&event).await;
        }
        info!("Notification worker stopped");
    }

    /// Deliver one event, returning whether it was sent
    pub async fn deliver(&self, event: &NotificationEvent) -> bool {
        let message = templates::render(event);
        let to = mask_email(&message.to);

        for attempt in 1..=self.policy.max_attempts {
            match self.sender.send(&message).await {
                Ok(()) => {
                    info!(event = event.name(), to = %to, attempt, "Notification sent");
                    return true;
                }
                Err(e) if attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        event = event.name(),
                        to = %to,
                        attempt,
                        error = %e,
                        "Notification failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!(
                        event = event.name(),
                        to = %to,
                        attempts = attempt,
                        error = %e,
                        "Notification dropped after retries"
                    );
                }
            }
        }
        false
    }
}
