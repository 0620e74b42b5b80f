use anyhow::Context;
use sqlx::{Pool, Postgres};

/// Soft deletes a document, hiding it from lists and reminders.
#[tracing::instrument(skip(db))]
pub async fn soft_delete_document(
    db: &Pool<Postgres>,
    user_id: &str,
    document_id: &str,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE "Document"
        SET "deletedAt" = NOW()
        WHERE id = $1 AND owner = $2 AND "deletedAt" IS NULL
        "#,
    )
    .bind(document_id)
    .bind(user_id)
    .execute(db)
    .await
    .context("unable to soft delete document")?;

    Ok(result.rows_affected() > 0)
}

/// Hard deletes a document row, returning the attached file key (if any) so
/// the caller can clean up object storage afterwards.
#[tracing::instrument(skip(db))]
pub async fn delete_document(
    db: &Pool<Postgres>,
    user_id: &str,
    document_id: &str,
) -> anyhow::Result<Option<Option<String>>> {
    let row: Option<(Option<String>,)> = sqlx::query_as(
        r#"
        DELETE FROM "Document"
        WHERE id = $1 AND owner = $2
        RETURNING "fileKey"
        "#,
    )
    .bind(document_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(|err| {
        tracing::error!(error=?err, document_id=?document_id, "unable to delete document");
        err
    })?;

    Ok(row.map(|(file_key,)| file_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::get_document;
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_soft_delete_document(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let deleted = soft_delete_document(&pool, "doctrack|user@user.com", "document-lease").await?;
        assert!(deleted);

        let document = get_document(&pool, "doctrack|user@user.com", "document-lease").await?;
        assert!(document.is_none());

        // second soft delete is a no-op
        let deleted = soft_delete_document(&pool, "doctrack|user@user.com", "document-lease").await?;
        assert!(!deleted);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_delete_document_returns_file_key(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let file_key = delete_document(&pool, "doctrack|user@user.com", "document-lease")
            .await?
            .expect("lease should exist");
        assert_eq!(
            file_key.as_deref(),
            Some("doctrack|user@user.com/documents/lease.pdf")
        );

        // a document without an attachment deletes with no key
        let file_key = delete_document(&pool, "doctrack|user@user.com", "document-warranty")
            .await?
            .expect("warranty should exist");
        assert_eq!(file_key, None);

        // already gone
        let missing = delete_document(&pool, "doctrack|user@user.com", "document-lease").await?;
        assert!(missing.is_none());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_delete_scopes_by_owner(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let missing = delete_document(&pool, "doctrack|user@user.com", "document-foreign").await?;
        assert!(missing.is_none());

        let still_there = get_document(&pool, "doctrack|other@user.com", "document-foreign").await?;
        assert!(still_there.is_some());

        Ok(())
    }
}
