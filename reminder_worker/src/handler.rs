use chrono::NaiveDate;
use mail_client::Mailer;
use sqlx::PgPool;

/// One sweep: finds due reminders, emails each owner, stamps the document.
///
/// Per-document failures are logged and skipped so one broken address does
/// not starve the rest of the batch.
#[tracing::instrument(skip(db, mailer))]
pub async fn process_due_reminders(
    db: &PgPool,
    mailer: &Mailer,
    today: NaiveDate,
) -> anyhow::Result<usize> {
    let due = doctrack_db_client::document::get_due_reminders(db, today).await?;

    if due.is_empty() {
        tracing::trace!("no reminders due");
        return Ok(0);
    }

    tracing::info!(count = due.len(), "sending reminders");

    let mut sent = 0usize;
    for reminder in due {
        let days_left = reminder.expires_at.map(|date| (date - today).num_days());

        if let Err(e) = mailer
            .send_reminder(
                &reminder.email,
                &reminder.title,
                reminder.expires_at,
                days_left,
            )
            .await
        {
            tracing::error!(
                error=?e,
                document_id=?reminder.document_id,
                "unable to send reminder, skipping"
            );
            continue;
        }

        if let Err(e) =
            doctrack_db_client::document::mark_reminder_sent(db, &reminder.document_id).await
        {
            // the next sweep will resend; noisy but not harmful
            tracing::error!(
                error=?e,
                document_id=?reminder.document_id,
                "unable to stamp reminder"
            );
        }

        sent += 1;
    }

    Ok(sent)
}
