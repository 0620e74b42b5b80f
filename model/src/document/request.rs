use super::DocumentKind;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Deserializes a field that distinguishes "absent" (outer `None`) from
/// "explicitly null" (`Some(None)`). Plain `Option<Option<T>>` collapses both
/// to `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// A file the client staged via `POST /documents/uploads` and now wants
/// attached to a document.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct StagedUpload {
    /// The staging key returned by the upload ticket
    pub key: String,
    /// The original file name
    pub file_name: String,
    /// The MIME type of the uploaded file
    pub mime_type: String,
    /// Size in bytes
    pub size_bytes: i64,
}

/// Body for `POST /documents`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct CreateDocumentRequest {
    /// The user-facing title
    pub title: String,
    /// The document kind
    #[serde(default)]
    pub kind: DocumentKind,
    /// When the document expires
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
    /// Explicit reminder date overriding the default window
    #[serde(default)]
    pub remind_at: Option<NaiveDate>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Identity-document number
    #[serde(default)]
    pub document_number: Option<String>,
    /// When the identity document was issued
    #[serde(default)]
    pub issued_at: Option<NaiveDate>,
    /// The authority that issued the document
    #[serde(default)]
    pub issuing_authority: Option<String>,
    /// Extracted extras to carry in the metadata bag
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// A staged upload to attach
    #[serde(default)]
    pub upload: Option<StagedUpload>,
}

/// Body for `PATCH /documents/:document_id`.
///
/// Absent fields are left unchanged. Nullable fields distinguish "absent"
/// from "explicitly null": sending `"expires_at": null` clears the date.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct UpdateDocumentRequest {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DocumentKind>,
    /// New expiration date, or null to clear it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub expires_at: Option<Option<NaiveDate>>,
    /// New reminder date, or null to clear it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub remind_at: Option<Option<NaiveDate>>,
    /// New notes, or null to clear them
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub notes: Option<Option<String>>,
    /// New document number, or null to clear it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub document_number: Option<Option<String>>,
    /// New issue date, or null to clear it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub issued_at: Option<Option<NaiveDate>>,
    /// New issuing authority, or null to clear it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub issuing_authority: Option<Option<String>>,
    /// Replacement metadata bag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    /// A staged upload replacing the current attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<StagedUpload>,
    /// Detach and delete the current attachment
    #[serde(default)]
    pub remove_file: bool,
}

impl UpdateDocumentRequest {
    /// True when the body changes nothing.
    pub fn is_empty(&self) -> bool {
        let UpdateDocumentRequest {
            title,
            kind,
            expires_at,
            remind_at,
            notes,
            document_number,
            issued_at,
            issuing_authority,
            metadata,
            upload,
            remove_file,
        } = self;
        title.is_none()
            && kind.is_none()
            && expires_at.is_none()
            && remind_at.is_none()
            && notes.is_none()
            && document_number.is_none()
            && issued_at.is_none()
            && issuing_authority.is_none()
            && metadata.is_none()
            && upload.is_none()
            && !remove_file
    }
}

/// Body for `POST /scan`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct ScanRequest {
    /// The staging key of the uploaded image to recognize
    pub upload_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_dates_are_distinct() {
        let unchanged: UpdateDocumentRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(unchanged.expires_at.is_none());
        assert!(unchanged.is_empty());

        let cleared: UpdateDocumentRequest =
            serde_json::from_str(r#"{"expires_at": null}"#).unwrap();
        assert_eq!(cleared.expires_at, Some(None));

        let set: UpdateDocumentRequest =
            serde_json::from_str(r#"{"expires_at": "2027-01-31"}"#).unwrap();
        assert_eq!(
            set.expires_at,
            Some(chrono::NaiveDate::from_ymd_opt(2027, 1, 31))
        );
    }

    #[test]
    fn create_defaults_to_other_kind() {
        let req: CreateDocumentRequest =
            serde_json::from_str(r#"{"title": "Gym membership"}"#).unwrap();
        assert_eq!(req.kind, DocumentKind::Other);
        assert!(req.metadata.is_empty());
    }
}
