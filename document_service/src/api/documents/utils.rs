use crate::api::context::ApiContext;
use model::document::Document;
use model::document::request::StagedUpload;

/// Moves a staged upload into the document's folder and returns the patch
/// columns pointing at it.
pub(super) async fn attach_staged_upload(
    state: &ApiContext,
    user_id: &str,
    document_id: &str,
    upload: &StagedUpload,
) -> anyhow::Result<String> {
    // a staged key outside the caller's prefix would let one user claim
    // another's upload
    if !upload.key.starts_with(&format!("{user_id}/uploads/")) {
        anyhow::bail!("staged upload key does not belong to the caller");
    }

    if !state.object_store.exists(&upload.key).await? {
        anyhow::bail!("staged upload was never completed");
    }

    let final_key = storage_client::document_key(user_id, document_id, &upload.file_name);
    state
        .object_store
        .promote_upload(&upload.key, &final_key)
        .await?;

    Ok(final_key)
}

/// Best-effort delete of a document's stored file; failures are logged and
/// swallowed so the row delete can proceed.
pub(super) async fn cleanup_file(state: &ApiContext, document: &Document) {
    let Some(file_key) = document.file_key.as_deref() else {
        return;
    };

    if let Err(e) = state.object_store.delete_object(file_key).await {
        tracing::error!(error=?e, file_key, "unable to delete stored file, continuing");
    }
}
