use crate::DOCUMENT_COLUMNS;
use model::document::Document;
use sqlx::{Pool, Postgres};

/// Fetches a single live document owned by `user_id`.
#[tracing::instrument(skip(db))]
pub async fn get_document(
    db: &Pool<Postgres>,
    user_id: &str,
    document_id: &str,
) -> anyhow::Result<Option<Document>> {
    let query = format!(
        r#"
        SELECT {DOCUMENT_COLUMNS}
        FROM "Document"
        WHERE id = $1 AND owner = $2 AND "deletedAt" IS NULL
        "#
    );

    let document = sqlx::query_as::<_, Document>(&query)
        .bind(document_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_get_document(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let document = get_document(&pool, "doctrack|user@user.com", "document-lease")
            .await?
            .expect("lease should exist");

        assert_eq!(document.title, "Apartment lease");
        assert_eq!(document.file().unwrap().name, "lease.pdf");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_get_document_scopes_by_owner(pool: Pool<Postgres>) -> anyhow::Result<()> {
        // document-foreign belongs to the other user
        let document = get_document(&pool, "doctrack|user@user.com", "document-foreign").await?;
        assert!(document.is_none());

        Ok(())
    }
}
