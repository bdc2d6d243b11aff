//! Email transports for the notification worker.
//!
//! `HttpEmailSender` posts to a Resend-style JSON API; `LogEmailSender`
//! writes messages to the log for development. [`create_email_sender`]
//! picks one from [`NotificationConfig`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use bo_core::services::notification::{EmailMessage, EmailSender, NotificationError};
use bo_shared::config::EmailProvider;

use crate::config::NotificationConfig;
use crate::InfrastructureError;

/// Writes every message to the log instead of sending it
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email not sent (log provider)\n---TEXT---\n{}",
            message.text,
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailPayload<'a> {
    pub from: String,
    pub to: [&'a str; 1],
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
}

/// Sends through an HTTP email API with bearer authentication
pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailSender {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from_name: &str,
        from_address: &str,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: format!("{} <{}>", from_name, from_address),
        })
    }

    pub(crate) fn payload<'a>(&self, message: &'a EmailMessage) -> EmailPayload<'a> {
        EmailPayload {
            from: self.from.clone(),
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        }
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

/// Build the configured transport
pub fn create_email_sender(
    config: &NotificationConfig,
) -> Result<Arc<dyn EmailSender>, InfrastructureError> {
    match config.provider {
        EmailProvider::Log => Ok(Arc::new(LogEmailSender)),
        EmailProvider::Http => {
            let api_url = config.api_url.as_deref().ok_or_else(|| {
                InfrastructureError::Config("notification.api_url is required".to_string())
            })?;
            let api_key = config.api_key.as_deref().ok_or_else(|| {
                InfrastructureError::Config("notification.api_key is required".to_string())
            })?;
            Ok(Arc::new(HttpEmailSender::new(
                api_url,
                api_key,
                &config.from_name,
                &config.from_address,
            )?))
        }
    }
}
