use super::{Document, DocumentStatus, FileRef};
use chrono::{DateTime, NaiveDate, Utc};
use utoipa::ToSchema;

/// A document as returned to the dashboard: the stored row plus its derived
/// status and file reference.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct DocumentView {
    /// The document uuid
    pub id: String,
    /// The user-facing title
    pub title: String,
    /// The document kind
    pub kind: String,
    /// The derived status as of the request date
    pub status: DocumentStatus,
    /// When the document expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    /// Explicit reminder date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remind_at: Option<NaiveDate>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Identity-document number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// When the identity document was issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<NaiveDate>,
    /// The issuing authority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_authority: Option<String>,
    /// The attached file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,
    /// Extracted extras
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    /// The time the document was created
    pub created_at: DateTime<Utc>,
    /// The time the document was last updated
    pub updated_at: DateTime<Utc>,
}

impl DocumentView {
    /// Builds the view of a stored document as of `today`.
    pub fn new(document: Document, today: NaiveDate) -> Self {
        let status = document.status(today);
        let file = document.file();
        DocumentView {
            id: document.id,
            title: document.title,
            kind: document.kind,
            status,
            expires_at: document.expires_at,
            remind_at: document.remind_at,
            notes: document.notes,
            document_number: document.document_number,
            issued_at: document.issued_at,
            issuing_authority: document.issuing_authority,
            file,
            metadata: document.metadata,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

/// Response body for `GET /documents`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct DocumentListResponse {
    /// The filtered, sorted page of documents
    pub documents: Vec<DocumentView>,
    /// Total documents the user owns (before filtering)
    pub total: i64,
}

/// One upcoming expiration on the dashboard.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct UpcomingExpiration {
    /// The document uuid
    pub id: String,
    /// The document title
    pub title: String,
    /// The document kind
    pub kind: String,
    /// The expiration date
    pub expires_at: NaiveDate,
    /// Days until expiration (negative when already expired)
    pub days_left: i64,
}

/// Response body for `GET /documents/stats`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct DashboardStats {
    /// Total tracked documents
    pub total: i64,
    /// Documents with a comfortably distant expiration
    pub valid: i64,
    /// Documents inside the reminder window
    pub expiring_soon: i64,
    /// Documents past their expiration date
    pub expired: i64,
    /// Documents with no expiration date
    pub no_expiry: i64,
    /// The soonest upcoming expirations
    pub upcoming: Vec<UpcomingExpiration>,
}

/// Response body for `POST /documents/uploads`: where to PUT the file.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct UploadTicket {
    /// The staging key to reference in later requests
    pub key: String,
    /// The presigned URL to upload the file to
    pub upload_url: String,
}

/// Response body for `GET /documents/:document_id/download`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct DownloadLink {
    /// A short-lived presigned URL for the attached file
    pub download_url: String,
}
