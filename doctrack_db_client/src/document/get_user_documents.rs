use crate::DOCUMENT_COLUMNS;
use model::document::Document;
use sqlx::{Pool, Postgres};

/// Fetches every live document owned by `user_id`, newest first.
///
/// Status filtering and sorting happen in memory (status is derived from the
/// request date), so this returns the full owner-scoped set.
#[tracing::instrument(skip(db))]
pub async fn get_user_documents(
    db: &Pool<Postgres>,
    user_id: &str,
) -> anyhow::Result<Vec<Document>> {
    let query = format!(
        r#"
        SELECT {DOCUMENT_COLUMNS}
        FROM "Document"
        WHERE owner = $1 AND "deletedAt" IS NULL
        ORDER BY "createdAt" DESC
        "#
    );

    let documents = sqlx::query_as::<_, Document>(&query)
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(|err| {
            tracing::error!(error=?err, "unable to list documents");
            err
        })?;

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_get_user_documents(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let documents = get_user_documents(&pool, "doctrack|user@user.com").await?;

        assert_eq!(documents.len(), 4);
        assert!(documents.iter().all(|d| d.owner == "doctrack|user@user.com"));

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_get_user_documents_empty(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let documents = get_user_documents(&pool, "doctrack|user@user.com").await?;
        assert!(documents.is_empty());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_soft_deleted_documents_are_hidden(pool: Pool<Postgres>) -> anyhow::Result<()> {
        sqlx::query(r#"UPDATE "Document" SET "deletedAt" = NOW() WHERE id = $1"#)
            .bind("document-warranty")
            .execute(&pool)
            .await?;

        let documents = get_user_documents(&pool, "doctrack|user@user.com").await?;
        assert_eq!(documents.len(), 3);
        assert!(documents.iter().all(|d| d.id != "document-warranty"));

        Ok(())
    }
}
