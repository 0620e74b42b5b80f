mod kind;
pub mod request;
pub mod response;
mod status;

pub use kind::DocumentKind;
pub use status::{DocumentStatus, EXPIRING_SOON_WINDOW_DAYS};

use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;
use utoipa::ToSchema;

/// A tracked document as stored in the `"Document"` table.
#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct Document {
    /// The document uuid
    pub id: String,
    /// The owner of the document
    pub owner: String,
    /// The user-facing title
    pub title: String,
    /// The document kind, stored as its snake_case name
    pub kind: String,
    /// When the document expires, if it expires at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    /// An explicit reminder date chosen by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remind_at: Option<NaiveDate>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Identity-document number, when the kind carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// When an identity document was issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<NaiveDate>,
    /// The authority that issued an identity document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_authority: Option<String>,
    /// Storage key of the attached file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
    /// Original name of the attached file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// MIME type of the attached file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_mime_type: Option<String>,
    /// Size of the attached file in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<i64>,
    /// Open-ended key/value bag for extracted extras
    pub metadata: serde_json::Value,
    /// When a reminder email was last sent for this document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reminder_at: Option<DateTime<Utc>>,
    /// The time the document was created
    pub created_at: DateTime<Utc>,
    /// The time the document was last updated
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// The parsed [DocumentKind]. Unknown stored values fall back to `Other`.
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_str(&self.kind).unwrap_or(DocumentKind::Other)
    }

    /// The derived status of this document as of `today`.
    pub fn status(&self, today: NaiveDate) -> DocumentStatus {
        DocumentStatus::classify(self.expires_at, today)
    }

    /// The attached file reference, when a file was uploaded.
    pub fn file(&self) -> Option<FileRef> {
        Some(FileRef {
            key: self.file_key.clone()?,
            name: self.file_name.clone().unwrap_or_default(),
            mime_type: self.file_mime_type.clone().unwrap_or_default(),
            size_bytes: self.file_size_bytes.unwrap_or_default(),
        })
    }
}

/// Reference to a stored document file.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct FileRef {
    /// The object storage key
    pub key: String,
    /// The original file name
    pub name: String,
    /// The MIME type reported at upload
    pub mime_type: String,
    /// Size in bytes
    pub size_bytes: i64,
}

