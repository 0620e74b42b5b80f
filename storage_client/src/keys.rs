use uuid::Uuid;

/// Key for a freshly staged upload.
pub fn staging_key(user_id: &str) -> String {
    format!("{user_id}/uploads/{}", Uuid::new_v4())
}

/// Final key for a document attachment.
///
/// The file name is flattened so a nested path cannot escape the document
/// folder.
pub fn document_key(user_id: &str, document_id: &str, file_name: &str) -> String {
    let file_name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    format!("{user_id}/documents/{document_id}/{file_name}")
}

/// Key for a user's avatar.
pub fn avatar_key(user_id: &str) -> String {
    format!("{user_id}/avatar")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_keys_are_unique_per_call() {
        let a = staging_key("doctrack|user@user.com");
        let b = staging_key("doctrack|user@user.com");
        assert_ne!(a, b);
        assert!(a.starts_with("doctrack|user@user.com/uploads/"));
    }

    #[test]
    fn document_keys_flatten_path_segments() {
        assert_eq!(
            document_key("u", "doc-1", "lease.pdf"),
            "u/documents/doc-1/lease.pdf"
        );
        assert_eq!(
            document_key("u", "doc-1", "../../escape.pdf"),
            "u/documents/doc-1/escape.pdf"
        );
        assert_eq!(
            document_key("u", "doc-1", r"C:\scans\passport.jpg"),
            "u/documents/doc-1/passport.jpg"
        );
    }
}
