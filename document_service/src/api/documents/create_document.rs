use crate::api::context::ApiContext;
use crate::api::documents::utils::attach_staged_upload;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use chrono::Utc;
use doctrack_db_client::document::{DocumentPatch, NewDocument};
use model::document::request::CreateDocumentRequest;
use model::document::response::DocumentView;
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;

/// Creates a new document, optionally promoting a staged upload into its
/// attachment.
#[utoipa::path(
        tag = "document",
        post,
        path = "/documents",
        request_body = CreateDocumentRequest,
        responses(
            (status = 201, body=DocumentView),
            (status = 400, body=GenericErrorResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context, body), fields(user_id=?user_context.user_id))]
pub async fn create_document_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    axum::Json(body): axum::Json<CreateDocumentRequest>,
) -> Response {
    tracing::info!("create document");

    if body.title.trim().is_empty() {
        return GenericResponse::builder()
            .message("title is required")
            .is_error(true)
            .send(StatusCode::BAD_REQUEST);
    }

    let metadata = serde_json::to_value(&body.metadata).unwrap_or_else(|_| serde_json::json!({}));
    let kind = body.kind.to_string();

    let document = match doctrack_db_client::document::create_document(
        &state.db,
        &user_context.user_id,
        NewDocument {
            title: body.title.trim(),
            kind: &kind,
            expires_at: body.expires_at,
            remind_at: body.remind_at,
            notes: body.notes.as_deref(),
            document_number: body.document_number.as_deref(),
            issued_at: body.issued_at,
            issuing_authority: body.issuing_authority.as_deref(),
            metadata,
            ..Default::default()
        },
    )
    .await
    {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(error=?e, "unable to create document");
            return GenericResponse::builder()
                .message("unable to create document")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // attach the staged file after the row exists so the final key can carry
    // the document id
    let document = if let Some(upload) = &body.upload {
        let final_key =
            match attach_staged_upload(&state, &user_context.user_id, &document.id, upload).await {
                Ok(final_key) => final_key,
                Err(e) => {
                    tracing::error!(error=?e, "unable to attach staged upload");
                    return GenericResponse::builder()
                        .message("unable to attach uploaded file")
                        .is_error(true)
                        .send(StatusCode::INTERNAL_SERVER_ERROR);
                }
            };

        match doctrack_db_client::document::update_document(
            &state.db,
            &user_context.user_id,
            &document.id,
            DocumentPatch {
                file_key: Some(Some(final_key)),
                file_name: Some(Some(upload.file_name.clone())),
                file_mime_type: Some(Some(upload.mime_type.clone())),
                file_size_bytes: Some(Some(upload.size_bytes)),
                ..Default::default()
            },
        )
        .await
        {
            Ok(Some(updated)) => updated,
            Ok(None) | Err(_) => {
                tracing::error!(document_id=?document.id, "unable to record attachment");
                return GenericResponse::builder()
                    .message("unable to record attachment")
                    .is_error(true)
                    .send(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    } else {
        document
    };

    let view = DocumentView::new(document, Utc::now().date_naive());

    GenericResponse::builder()
        .data(&view)
        .send(StatusCode::CREATED)
}
