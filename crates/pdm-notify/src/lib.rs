//! New-comment e-mail notifications.
//!
//! After a comment is posted the site pings a hook that mails the author of
//! the book. This crate composes that message from the posted comment and the
//! [`NotifySettings`]; delivering it (a form POST to the Mailgun messages
//! endpoint) is left to the caller.

use std::fmt;

use pdm_comments::NewComment;
use pdm_conf::NotifySettings;
use serde::Serialize;
use thiserror::Error;

const MAILGUN_API_BASE: &str = "https://api.mailgun.net/v3";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Notification recipient is not configured (notify.recipient)")]
    MissingRecipient,
}

/// The outcome of preparing a notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// No API key is configured; nothing will be sent.
    Skipped,
    Ready(Email),
}

impl Notification {
    pub fn prepare(comment: &NewComment, settings: &NotifySettings) -> Result<Self, NotifyError> {
        if settings.api_key().is_none() {
            tracing::info!("No Mailgun API key configured. Email notification skipped.");
            return Ok(Self::Skipped);
        }

        let recipient = settings
            .recipient
            .as_deref()
            .map(str::trim)
            .filter(|recipient| !recipient.is_empty())
            .ok_or(NotifyError::MissingRecipient)?;

        let email = Email::compose(comment, settings, recipient);
        tracing::debug!(to = %email.to, subject = %email.subject, "prepared notification");
        Ok(Self::Ready(email))
    }
}

/// Form fields of a Mailgun message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl Email {
    fn compose(comment: &NewComment, settings: &NotifySettings, recipient: &str) -> Self {
        let kind = if comment.is_reply() {
            "Reply"
        } else {
            "New Comment"
        };

        let text = format!(
            "New Comment on {site} Website\n\
             \n\
             From: {author}\n\
             Type: {kind}\n\
             \n\
             Content:\n\
             {content}\n\
             \n\
             ---\n\
             This is an automated notification from the {title} website.\n",
            site = settings.site_name,
            author = comment.author_name,
            content = comment.content,
            title = settings.site_title,
        );

        Self {
            from: format!(
                "{} <noreply@{}>",
                settings.site_name, settings.mailgun_domain
            ),
            to: recipient.to_string(),
            subject: format!("New Comment from {}", comment.author_name),
            text,
        }
    }

    /// The messages endpoint for a Mailgun sending domain.
    #[must_use]
    pub fn endpoint(domain: &str) -> String {
        format!("{MAILGUN_API_BASE}/{domain}/messages")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "From: {}", self.from)?;
        writeln!(f, "To: {}", self.to)?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f)?;
        write!(f, "{}", self.text)
    }
}
