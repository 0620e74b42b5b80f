//! Postgres data access for the doctrack platform.
//!
//! Every query is scoped by the owning user where the table is per-user;
//! callers pass the authenticated user id.

pub mod document;
pub mod two_factor;
pub mod user;

/// The column list every `"Document"` query selects, aliased to the
/// snake_case names [model::document::Document] derives `FromRow` with.
pub(crate) const DOCUMENT_COLUMNS: &str = r#"
    id,
    owner,
    title,
    kind,
    "expiresAt" AS expires_at,
    "remindAt" AS remind_at,
    notes,
    "documentNumber" AS document_number,
    "issuedAt" AS issued_at,
    "issuingAuthority" AS issuing_authority,
    "fileKey" AS file_key,
    "fileName" AS file_name,
    "fileMimeType" AS file_mime_type,
    "fileSizeBytes" AS file_size_bytes,
    metadata,
    "lastReminderAt" AS last_reminder_at,
    "createdAt" AS created_at,
    "updatedAt" AS updated_at
"#;
