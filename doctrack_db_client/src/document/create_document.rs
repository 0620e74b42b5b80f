use crate::DOCUMENT_COLUMNS;
use chrono::NaiveDate;
use model::document::Document;
use sqlx::{Pool, Postgres};
use tracing::instrument;

/// Everything needed to insert a new document row.
#[derive(Debug, Default)]
pub struct NewDocument<'a> {
    pub title: &'a str,
    pub kind: &'a str,
    pub expires_at: Option<NaiveDate>,
    pub remind_at: Option<NaiveDate>,
    pub notes: Option<&'a str>,
    pub document_number: Option<&'a str>,
    pub issued_at: Option<NaiveDate>,
    pub issuing_authority: Option<&'a str>,
    pub file_key: Option<&'a str>,
    pub file_name: Option<&'a str>,
    pub file_mime_type: Option<&'a str>,
    pub file_size_bytes: Option<i64>,
    pub metadata: serde_json::Value,
}

/// Creates a new document owned by `user_id`.
#[instrument(skip(db, new_document))]
pub async fn create_document(
    db: &Pool<Postgres>,
    user_id: &str,
    new_document: NewDocument<'_>,
) -> anyhow::Result<Document> {
    tracing::trace!("creating document");

    let metadata = if new_document.metadata.is_null() {
        serde_json::json!({})
    } else {
        new_document.metadata
    };

    let query = format!(
        r#"
        INSERT INTO "Document" (
            owner, title, kind, "expiresAt", "remindAt", notes,
            "documentNumber", "issuedAt", "issuingAuthority",
            "fileKey", "fileName", "fileMimeType", "fileSizeBytes", metadata
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING {DOCUMENT_COLUMNS}
        "#
    );

    let document = sqlx::query_as::<_, Document>(&query)
        .bind(user_id)
        .bind(new_document.title)
        .bind(new_document.kind)
        .bind(new_document.expires_at)
        .bind(new_document.remind_at)
        .bind(new_document.notes)
        .bind(new_document.document_number)
        .bind(new_document.issued_at)
        .bind(new_document.issuing_authority)
        .bind(new_document.file_key)
        .bind(new_document.file_name)
        .bind(new_document.file_mime_type)
        .bind(new_document.file_size_bytes)
        .bind(metadata)
        .fetch_one(db)
        .await
        .map_err(|err| {
            tracing::error!(error=?err, "unable to create document");
            err
        })?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::document::{DocumentKind, DocumentStatus};
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_create_document(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let document = create_document(
            &pool,
            "doctrack|user@user.com",
            NewDocument {
                title: "Passport",
                kind: "passport",
                expires_at: NaiveDate::from_ymd_opt(2031, 5, 1),
                document_number: Some("P1234567"),
                issuing_authority: Some("HM Passport Office"),
                metadata: serde_json::json!({"mrz_line": "P<GBR"}),
                ..Default::default()
            },
        )
        .await?;

        assert!(!document.id.is_empty());
        assert_eq!(document.owner, "doctrack|user@user.com");
        assert_eq!(document.kind(), DocumentKind::Passport);
        assert_eq!(document.document_number.as_deref(), Some("P1234567"));
        assert_eq!(document.metadata["mrz_line"], "P<GBR");
        assert_eq!(
            document.status(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()),
            DocumentStatus::Valid
        );

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_create_document_defaults(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let document = create_document(
            &pool,
            "doctrack|user@user.com",
            NewDocument {
                title: "Warranty card",
                kind: "other",
                metadata: serde_json::Value::Null,
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(document.expires_at, None);
        assert_eq!(document.metadata, serde_json::json!({}));
        assert_eq!(document.file(), None);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_create_document_unknown_owner(pool: Pool<Postgres>) {
        let result = create_document(
            &pool,
            "doctrack|nobody@fake.com",
            NewDocument {
                title: "Orphan",
                kind: "other",
                ..Default::default()
            },
        )
        .await;

        assert!(result.is_err());
    }
}
