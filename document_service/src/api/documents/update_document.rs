use crate::api::context::ApiContext;
use crate::api::documents::utils::attach_staged_upload;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use doctrack_db_client::document::DocumentPatch;
use model::document::request::UpdateDocumentRequest;
use model::document::response::DocumentView;
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Params {
    pub document_id: String,
}

/// Applies an edit-form patch to a document.
#[utoipa::path(
        tag = "document",
        patch,
        path = "/documents/{document_id}",
        params(
            ("document_id" = String, Path, description = "Document ID")
        ),
        request_body = UpdateDocumentRequest,
        responses(
            (status = 200, body=DocumentView),
            (status = 400, body=GenericErrorResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 404, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context, body), fields(user_id=?user_context.user_id))]
pub async fn update_document_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    Path(Params { document_id }): Path<Params>,
    axum::Json(body): axum::Json<UpdateDocumentRequest>,
) -> Response {
    tracing::info!("update document");

    if body.is_empty() {
        return GenericResponse::builder()
            .message("nothing to update")
            .is_error(true)
            .send(StatusCode::BAD_REQUEST);
    }

    if let Some(title) = &body.title
        && title.trim().is_empty()
    {
        return GenericResponse::builder()
            .message("title cannot be empty")
            .is_error(true)
            .send(StatusCode::BAD_REQUEST);
    }

    // the current row is needed up front when the attachment changes, so the
    // old object can be cleaned up
    let existing = if body.upload.is_some() || body.remove_file {
        match doctrack_db_client::document::get_document(
            &state.db,
            &user_context.user_id,
            &document_id,
        )
        .await
        {
            Ok(Some(document)) => Some(document),
            Ok(None) => {
                return GenericResponse::builder()
                    .message("document not found")
                    .is_error(true)
                    .send(StatusCode::NOT_FOUND);
            }
            Err(e) => {
                tracing::error!(error=?e, "unable to get document");
                return GenericResponse::builder()
                    .message("unable to update document")
                    .is_error(true)
                    .send(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    } else {
        None
    };

    let mut patch = DocumentPatch {
        title: body.title.map(|t| t.trim().to_string()),
        kind: body.kind.map(|k| k.to_string()),
        expires_at: body.expires_at,
        remind_at: body.remind_at,
        notes: body.notes,
        document_number: body.document_number,
        issued_at: body.issued_at,
        issuing_authority: body.issuing_authority,
        metadata: body
            .metadata
            .map(|m| serde_json::to_value(m).unwrap_or_else(|_| serde_json::json!({}))),
        ..Default::default()
    };

    if let Some(upload) = &body.upload {
        let final_key =
            match attach_staged_upload(&state, &user_context.user_id, &document_id, upload).await {
                Ok(final_key) => final_key,
                Err(e) => {
                    tracing::error!(error=?e, "unable to attach staged upload");
                    return GenericResponse::builder()
                        .message("unable to attach uploaded file")
                        .is_error(true)
                        .send(StatusCode::INTERNAL_SERVER_ERROR);
                }
            };
        patch.file_key = Some(Some(final_key));
        patch.file_name = Some(Some(upload.file_name.clone()));
        patch.file_mime_type = Some(Some(upload.mime_type.clone()));
        patch.file_size_bytes = Some(Some(upload.size_bytes));
    } else if body.remove_file {
        patch.file_key = Some(None);
        patch.file_name = Some(None);
        patch.file_mime_type = Some(None);
        patch.file_size_bytes = Some(None);
    }

    let updated = match doctrack_db_client::document::update_document(
        &state.db,
        &user_context.user_id,
        &document_id,
        patch,
    )
    .await
    {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            return GenericResponse::builder()
                .message("document not found")
                .is_error(true)
                .send(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            tracing::error!(error=?e, "unable to update document");
            return GenericResponse::builder()
                .message("unable to update document")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // the previous attachment is unreferenced now; losing it to a storage
    // hiccup is tolerated
    if let Some(existing) = existing
        && existing.file_key != updated.file_key
    {
        crate::api::documents::utils::cleanup_file(&state, &existing).await;
    }

    let view = DocumentView::new(updated, Utc::now().date_naive());

    GenericResponse::builder().data(&view).send(StatusCode::OK)
}
