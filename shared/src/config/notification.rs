//! Notification delivery configuration

use serde::{Deserialize, Serialize};

/// Which email transport delivers notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Write rendered emails to the log only
    Log,
    /// POST rendered emails to a transactional email API
    Http,
}

/// Notification outbox and email transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    #[serde(default = "default_provider")]
    pub provider: EmailProvider,

    /// Email API endpoint (http provider)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer key for the email API
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Dashboard page that accepts password setup tokens
    #[serde(default = "default_setup_url")]
    pub password_setup_url: String,

    /// Pending events the outbox holds before dropping
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,

    /// Delivery attempts per email
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay between attempts in milliseconds (doubled each retry)
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            from_address: default_from_address(),
            from_name: default_from_name(),
            password_setup_url: default_setup_url(),
            outbox_capacity: default_outbox_capacity(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_provider() -> EmailProvider {
    EmailProvider::Log
}

fn default_from_address() -> String {
    String::from("no-reply@backoffice.local")
}

fn default_from_name() -> String {
    String::from("Back Office")
}

fn default_setup_url() -> String {
    String::from("http://localhost:3000/set-password")
}

fn default_outbox_capacity() -> usize {
    1024
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    500
}
