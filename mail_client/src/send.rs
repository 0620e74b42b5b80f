use crate::SecurityEvent;
use anyhow::Context;
use aws_sdk_sesv2 as ses;
use chrono::NaiveDate;
use ses::types::{Body, Content, Destination, EmailContent, Message};

/// Builds the reminder subject line.
pub(crate) fn reminder_subject(document_title: &str, days_left: Option<i64>) -> String {
    match days_left {
        Some(0) => format!("{document_title} expires today"),
        Some(1) => format!("{document_title} expires tomorrow"),
        Some(days) => format!("{document_title} expires in {days} days"),
        None => format!("Reminder: {document_title}"),
    }
}

fn reminder_body(document_title: &str, expires_at: Option<NaiveDate>) -> (String, String) {
    let when = expires_at
        .map(|date| format!(" on {}", date.format("%B %-d, %Y")))
        .unwrap_or_default();

    let text = format!(
        "Your document \"{document_title}\" expires{when}.\n\n\
         Open your doctrack dashboard to review or renew it."
    );
    let html = format!(
        "<p>Your document <strong>{document_title}</strong> expires{when}.</p>\
         <p>Open your doctrack dashboard to review or renew it.</p>"
    );

    (text, html)
}

#[tracing::instrument(skip(client))]
pub(crate) async fn send_reminder(
    client: &ses::Client,
    from_email: &str,
    to_email: &str,
    document_title: &str,
    expires_at: Option<NaiveDate>,
    days_left: Option<i64>,
) -> anyhow::Result<()> {
    let subject = reminder_subject(document_title, days_left);
    let (text, html) = reminder_body(document_title, expires_at);

    send(client, from_email, to_email, &subject, &text, &html).await
}

#[tracing::instrument(skip(client))]
pub(crate) async fn send_security_alert(
    client: &ses::Client,
    from_email: &str,
    to_email: &str,
    event: SecurityEvent,
) -> anyhow::Result<()> {
    let (subject, action) = match event {
        SecurityEvent::TwoFactorEnabled => (
            "Two-factor authentication enabled",
            "was enabled on your account",
        ),
        SecurityEvent::TwoFactorDisabled => (
            "Two-factor authentication disabled",
            "was disabled on your account",
        ),
    };

    let text = format!(
        "Two-factor authentication {action}.\n\n\
         If this wasn't you, reset your password immediately."
    );
    let html = format!(
        "<p>Two-factor authentication {action}.</p>\
         <p>If this wasn't you, reset your password immediately.</p>"
    );

    send(client, from_email, to_email, subject, &text, &html).await
}

async fn send(
    client: &ses::Client,
    from_email: &str,
    to_email: &str,
    subject: &str,
    text: &str,
    html: &str,
) -> anyhow::Result<()> {
    let subject = Content::builder()
        .data(subject)
        .charset("UTF-8")
        .build()
        .context("building subject")?;
    let text = Content::builder()
        .data(text)
        .charset("UTF-8")
        .build()
        .context("building text body")?;
    let html = Content::builder()
        .data(html)
        .charset("UTF-8")
        .build()
        .context("building html body")?;

    let message = Message::builder()
        .subject(subject)
        .body(Body::builder().text(text).html(html).build())
        .build();

    client
        .send_email()
        .from_email_address(from_email)
        .destination(Destination::builder().to_addresses(to_email).build())
        .content(EmailContent::builder().simple(message).build())
        .send()
        .await
        .context(format!("could not send email to {to_email}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_counts_down() {
        assert_eq!(reminder_subject("Passport", Some(14)), "Passport expires in 14 days");
        assert_eq!(reminder_subject("Passport", Some(1)), "Passport expires tomorrow");
        assert_eq!(reminder_subject("Passport", Some(0)), "Passport expires today");
        assert_eq!(reminder_subject("Passport", None), "Reminder: Passport");
    }

    #[test]
    fn body_mentions_the_date() {
        let (text, html) = reminder_body("Lease", NaiveDate::from_ymd_opt(2026, 8, 20));
        assert!(text.contains("on August 20, 2026"));
        assert!(html.contains("<strong>Lease</strong>"));
    }
}
