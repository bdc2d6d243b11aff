//! Rendering of notification events into emails

use crate::domain::events::{AccountKind, NotificationEvent};

use super::sender::EmailMessage;

fn step_suffix(step: Option<u8>) -> String {
    match step {
        Some(step) => format!(" (registration step {})", step),
        None => String::new(),
    }
}

fn account_noun(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::User => "account",
        AccountKind::Admin => "admin account",
        AccountKind::Contractor => "contractor registration",
        AccountKind::Store => "store registration",
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn html_paragraphs(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render an event into a plain-text + HTML email
pub fn render(event: &NotificationEvent) -> EmailMessage {
    let recipient = event.recipient();
    let greeting = format!("Hello {},", recipient.name);

    let (subject, body): (String, Vec<String>) = match event {
        NotificationEvent::Approved { recipient, step } => (
            format!("Your {} has been approved", account_noun(recipient.kind)),
            vec![format!(
                "Your {}{} has been approved.",
                account_noun(recipient.kind),
                step_suffix(*step)
            )],
        ),
        NotificationEvent::Rejected {
            recipient,
            step,
            reason,
        } => (
            format!("Your {} was not approved", account_noun(recipient.kind)),
            vec![
                format!(
                    "Unfortunately your {}{} was not approved.",
                    account_noun(recipient.kind),
                    step_suffix(*step)
                ),
                format!("Reason: {}", reason),
            ],
        ),
        NotificationEvent::Blocked { recipient } => (
            format!("Your {} has been blocked", account_noun(recipient.kind)),
            vec![format!(
                "Your {} has been blocked. Contact support if you believe this is a mistake.",
                account_noun(recipient.kind)
            )],
        ),
        NotificationEvent::Unblocked { recipient } => (
            format!("Your {} has been unblocked", account_noun(recipient.kind)),
            vec![format!(
                "Your {} is active again.",
                account_noun(recipient.kind)
            )],
        ),
        NotificationEvent::AdminInvited { setup_url, .. } => (
            "You have been added as an administrator".to_string(),
            vec![
                "An administrator account has been created for you.".to_string(),
                format!("Choose your password here: {}", setup_url),
                "This link can be used once.".to_string(),
            ],
        ),
    };

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(greeting);
    lines.extend(body);

    EmailMessage {
        to: recipient.email.clone(),
        subject,
        html: html_paragraphs(&lines),
        text: lines.join("\n\n"),
    }
}
