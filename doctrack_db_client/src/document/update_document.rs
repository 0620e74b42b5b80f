use crate::DOCUMENT_COLUMNS;
use chrono::NaiveDate;
use model::document::Document;
use sqlx::{Pool, Postgres, QueryBuilder};

/// The set of column changes to apply to a document.
///
/// Outer `None` leaves a column untouched; `Some(None)` clears a nullable
/// column.
#[derive(Debug, Default)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub expires_at: Option<Option<NaiveDate>>,
    pub remind_at: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
    pub document_number: Option<Option<String>>,
    pub issued_at: Option<Option<NaiveDate>>,
    pub issuing_authority: Option<Option<String>>,
    pub metadata: Option<serde_json::Value>,
    pub file_key: Option<Option<String>>,
    pub file_name: Option<Option<String>>,
    pub file_mime_type: Option<Option<String>>,
    pub file_size_bytes: Option<Option<i64>>,
}

/// Applies a patch to a live document owned by `user_id`, returning the
/// updated row, or `None` when no such document exists.
#[tracing::instrument(skip(db, patch))]
pub async fn update_document(
    db: &Pool<Postgres>,
    user_id: &str,
    document_id: &str,
    patch: DocumentPatch,
) -> anyhow::Result<Option<Document>> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(r#"UPDATE "Document" SET "updatedAt" = NOW()"#);

    if let Some(title) = patch.title {
        builder.push(", title = ").push_bind(title);
    }
    if let Some(kind) = patch.kind {
        builder.push(", kind = ").push_bind(kind);
    }
    if let Some(expires_at) = patch.expires_at {
        builder.push(r#", "expiresAt" = "#).push_bind(expires_at);
    }
    if let Some(remind_at) = patch.remind_at {
        builder.push(r#", "remindAt" = "#).push_bind(remind_at);
    }
    if let Some(notes) = patch.notes {
        builder.push(", notes = ").push_bind(notes);
    }
    if let Some(document_number) = patch.document_number {
        builder
            .push(r#", "documentNumber" = "#)
            .push_bind(document_number);
    }
    if let Some(issued_at) = patch.issued_at {
        builder.push(r#", "issuedAt" = "#).push_bind(issued_at);
    }
    if let Some(issuing_authority) = patch.issuing_authority {
        builder
            .push(r#", "issuingAuthority" = "#)
            .push_bind(issuing_authority);
    }
    if let Some(metadata) = patch.metadata {
        builder.push(", metadata = ").push_bind(metadata);
    }
    if let Some(file_key) = patch.file_key {
        builder.push(r#", "fileKey" = "#).push_bind(file_key);
    }
    if let Some(file_name) = patch.file_name {
        builder.push(r#", "fileName" = "#).push_bind(file_name);
    }
    if let Some(file_mime_type) = patch.file_mime_type {
        builder
            .push(r#", "fileMimeType" = "#)
            .push_bind(file_mime_type);
    }
    if let Some(file_size_bytes) = patch.file_size_bytes {
        builder
            .push(r#", "fileSizeBytes" = "#)
            .push_bind(file_size_bytes);
    }

    builder
        .push(" WHERE id = ")
        .push_bind(document_id)
        .push(" AND owner = ")
        .push_bind(user_id)
        .push(r#" AND "deletedAt" IS NULL RETURNING "#)
        .push(DOCUMENT_COLUMNS);

    let document = builder
        .build_query_as::<Document>()
        .fetch_optional(db)
        .await
        .map_err(|err| {
            tracing::error!(error=?err, "unable to update document");
            err
        })?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_update_sets_and_clears_fields(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let updated = update_document(
            &pool,
            "doctrack|user@user.com",
            "document-lease",
            DocumentPatch {
                title: Some("Old apartment lease".to_string()),
                expires_at: Some(NaiveDate::from_ymd_opt(2027, 3, 31)),
                notes: Some(None),
                ..Default::default()
            },
        )
        .await?
        .expect("lease should exist");

        assert_eq!(updated.title, "Old apartment lease");
        assert_eq!(updated.expires_at, NaiveDate::from_ymd_opt(2027, 3, 31));
        assert_eq!(updated.notes, None);
        // untouched columns survive
        assert_eq!(updated.file().unwrap().name, "lease.pdf");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_update_detaches_file(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let updated = update_document(
            &pool,
            "doctrack|user@user.com",
            "document-lease",
            DocumentPatch {
                file_key: Some(None),
                file_name: Some(None),
                file_mime_type: Some(None),
                file_size_bytes: Some(None),
                ..Default::default()
            },
        )
        .await?
        .expect("lease should exist");

        assert_eq!(updated.file(), None);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "documents")))]
    async fn test_update_scopes_by_owner(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let updated = update_document(
            &pool,
            "doctrack|user@user.com",
            "document-foreign",
            DocumentPatch {
                title: Some("hijacked".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert!(updated.is_none());

        Ok(())
    }
}
