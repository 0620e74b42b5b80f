use chrono::NaiveDate;
use model::document::EXPIRING_SOON_WINDOW_DAYS;
use sqlx::{Pool, Postgres};

/// Per-status document counts for the dashboard.
#[derive(sqlx::FromRow, Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: i64,
    pub valid: i64,
    pub expiring_soon: i64,
    pub expired: i64,
    pub no_expiry: i64,
}

/// A row feeding the dashboard's upcoming-expirations list.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct UpcomingRow {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub expires_at: NaiveDate,
}

/// Counts the user's live documents by derived status as of `today`.
#[tracing::instrument(skip(db))]
pub async fn get_status_counts(
    db: &Pool<Postgres>,
    user_id: &str,
    today: NaiveDate,
) -> anyhow::Result<StatusCounts> {
    let counts = sqlx::query_as::<_, StatusCounts>(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(*) FILTER (WHERE "expiresAt" > $2 + $3::int) AS valid,
            COUNT(*) FILTER (
                WHERE "expiresAt" >= $2 AND "expiresAt" <= $2 + $3::int
            ) AS expiring_soon,
            COUNT(*) FILTER (WHERE "expiresAt" < $2) AS expired,
            COUNT(*) FILTER (WHERE "expiresAt" IS NULL) AS no_expiry
        FROM "Document"
        WHERE owner = $1 AND "deletedAt" IS NULL
        "#,
    )
    .bind(user_id)
    .bind(today)
    .bind(EXPIRING_SOON_WINDOW_DAYS as i32)
    .fetch_one(db)
    .await
    .map_err(|err| {
        tracing::error!(error=?err, "unable to count documents by status");
        err
    })?;

    Ok(counts)
}

/// Fetches the user's soonest upcoming expirations, today included.
#[tracing::instrument(skip(db))]
pub async fn get_upcoming_expirations(
    db: &Pool<Postgres>,
    user_id: &str,
    today: NaiveDate,
    limit: i64,
) -> anyhow::Result<Vec<UpcomingRow>> {
    let rows = sqlx::query_as::<_, UpcomingRow>(
        r#"
        SELECT id, title, kind, "expiresAt" AS expires_at
        FROM "Document"
        WHERE owner = $1
          AND "deletedAt" IS NULL
          AND "expiresAt" IS NOT NULL
          AND "expiresAt" >= $2
        ORDER BY "expiresAt" ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(today)
    .bind(limit)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_status_counts(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();
        let counts = get_status_counts(&pool, "doctrack|user@user.com", today).await?;

        assert_eq!(
            counts,
            StatusCounts {
                total: 4,
                valid: 1,         // passport, 2031
                expiring_soon: 1, // lease, +14 days
                expired: 1,       // insurance, -10 days
                no_expiry: 1,     // warranty card
            }
        );

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_upcoming_expirations(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();
        let upcoming = get_upcoming_expirations(&pool, "doctrack|user@user.com", today, 5).await?;

        // expired insurance is not upcoming; lease comes before the passport
        let ids: Vec<&str> = upcoming.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["document-lease", "document-passport"]);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_counts_for_empty_account(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();
        let counts = get_status_counts(&pool, "doctrack|user@user.com", today).await?;
        assert_eq!(counts, StatusCounts::default());

        Ok(())
    }
}
