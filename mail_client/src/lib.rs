//! Transactional email for doctrack: expiration reminders and security
//! notices, sent through SESv2.

mod send;

use aws_sdk_sesv2 as ses;
use chrono::NaiveDate;
#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockSesMailer as Mailer;
#[cfg(not(test))]
pub use SesMailer as Mailer;

/// A change to the account's two-factor setting worth notifying about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEvent {
    /// Two-factor authentication was enabled
    TwoFactorEnabled,
    /// Two-factor authentication was disabled
    TwoFactorDisabled,
}

#[derive(Clone, Debug)]
pub struct SesMailer {
    inner: ses::Client,
    from_email: Option<String>,
}

#[cfg_attr(test, automock)]
impl SesMailer {
    pub fn new(inner: ses::Client) -> Self {
        Self {
            inner,
            from_email: None,
        }
    }

    /// Sets the from address reminders are sent with
    pub fn from_email(mut self, from_email: &str) -> Self {
        self.from_email = Some(from_email.to_string());
        self
    }

    /// Sends an expiration reminder for one document
    #[tracing::instrument(skip(self))]
    pub async fn send_reminder(
        &self,
        to_email: &str,
        document_title: &str,
        expires_at: Option<NaiveDate>,
        days_left: Option<i64>,
    ) -> anyhow::Result<()> {
        let Some(from_email) = &self.from_email else {
            return Err(anyhow::anyhow!("from_email is not set"));
        };

        send::send_reminder(
            &self.inner,
            from_email,
            to_email,
            document_title,
            expires_at,
            days_left,
        )
        .await
    }

    /// Notifies the user that their two-factor setting changed
    #[tracing::instrument(skip(self))]
    pub async fn send_security_alert(
        &self,
        to_email: &str,
        event: SecurityEvent,
    ) -> anyhow::Result<()> {
        let Some(from_email) = &self.from_email else {
            return Err(anyhow::anyhow!("from_email is not set"));
        };

        send::send_security_alert(&self.inner, from_email, to_email, event).await
    }
}
