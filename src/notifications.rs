//! Outgoing mail.

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Mail delivery failed: {0}")]
    DeliveryFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ConfirmEmail {
        to: String,
        name: String,
        url: String,
    },
    ResetPassword {
        to: String,
        url: String,
    },
}

impl Notification {
    pub fn recipient(&self) -> &str {
        match self {
            Self::ConfirmEmail { to, .. } | Self::ResetPassword { to, .. } => to,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfirmEmail { .. } => f.write_str("confirm_email"),
            Self::ResetPassword { .. } => f.write_str("reset_password"),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Mailer: Send + Sync {
    fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Writes mails to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let (greeting, url) = match notification {
            Notification::ConfirmEmail { name, url, .. } => (Some(name.as_str()), url),
            Notification::ResetPassword { url, .. } => (None, url),
        };
        tracing::info!(
            kind = %notification,
            to = notification.recipient(),
            name = greeting,
            %url,
            "Sending mail"
        );
        Ok(())
    }
}
