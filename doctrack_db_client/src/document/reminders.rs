use chrono::NaiveDate;
use model::document::EXPIRING_SOON_WINDOW_DAYS;
use sqlx::{Pool, Postgres};

/// A document whose reminder is due, joined with the owner's email.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub document_id: String,
    pub email: String,
    pub title: String,
    pub expires_at: Option<NaiveDate>,
}

/// Finds documents whose reminder should be sent as of `today`.
///
/// A reminder is due when the explicit `"remindAt"` date has arrived, or,
/// absent one, when the expiration date falls inside the reminder window.
/// Documents reminded within the last day are excluded.
#[tracing::instrument(skip(db))]
pub async fn get_due_reminders(
    db: &Pool<Postgres>,
    today: NaiveDate,
) -> anyhow::Result<Vec<DueReminder>> {
    let reminders = sqlx::query_as::<_, DueReminder>(
        r#"
        SELECT
            d.id AS document_id,
            u.email,
            d.title,
            d."expiresAt" AS expires_at
        FROM "Document" d
        JOIN "User" u ON u.id = d.owner
        WHERE d."deletedAt" IS NULL
          AND (
            (d."remindAt" IS NOT NULL AND d."remindAt" <= $1)
            OR (
                d."remindAt" IS NULL
                AND d."expiresAt" IS NOT NULL
                AND d."expiresAt" >= $1
                AND d."expiresAt" <= $1 + $2::int
            )
          )
          AND (
            d."lastReminderAt" IS NULL
            OR d."lastReminderAt" < NOW() - INTERVAL '1 day'
          )
        ORDER BY d."expiresAt" ASC NULLS LAST
        "#,
    )
    .bind(today)
    .bind(EXPIRING_SOON_WINDOW_DAYS as i32)
    .fetch_all(db)
    .await
    .map_err(|err| {
        tracing::error!(error=?err, "unable to query due reminders");
        err
    })?;

    Ok(reminders)
}

/// Stamps a document as reminded now.
#[tracing::instrument(skip(db))]
pub async fn mark_reminder_sent(db: &Pool<Postgres>, document_id: &str) -> anyhow::Result<()> {
    sqlx::query(r#"UPDATE "Document" SET "lastReminderAt" = NOW() WHERE id = $1"#)
        .bind(document_id)
        .execute(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_window_reminders_are_due(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();
        let due = get_due_reminders(&pool, today).await?;

        // document-lease expires in 14 days; document-insurance is already
        // expired and document-passport is years out, so neither is due.
        let ids: Vec<&str> = due.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(ids, vec!["document-lease"]);
        assert_eq!(due[0].email, "user@user.com");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_explicit_remind_at_beats_the_window(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();

        // an arrived remind_at on a far-future expiry is due
        sqlx::query(r#"UPDATE "Document" SET "remindAt" = CURRENT_DATE WHERE id = $1"#)
            .bind("document-passport")
            .execute(&pool)
            .await?;
        // an explicit future remind_at suppresses the window
        sqlx::query(r#"UPDATE "Document" SET "remindAt" = CURRENT_DATE + 7 WHERE id = $1"#)
            .bind("document-lease")
            .execute(&pool)
            .await?;

        let due = get_due_reminders(&pool, today).await?;
        let ids: Vec<&str> = due.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(ids, vec!["document-passport"]);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_recent_reminder_suppresses_resend(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();

        mark_reminder_sent(&pool, "document-lease").await?;
        let due = get_due_reminders(&pool, today).await?;
        assert!(due.is_empty());

        Ok(())
    }
}
