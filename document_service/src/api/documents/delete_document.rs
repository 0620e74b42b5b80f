use crate::api::context::ApiContext;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use model::response::{GenericErrorResponse, GenericResponse, GenericSuccessResponse, SuccessResponse};
use model::user::UserContext;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Params {
    pub document_id: String,
}

/// Deletes a document. The document is soft deleted and disappears from
/// lists and reminders immediately.
#[utoipa::path(
        tag = "document",
        delete,
        path = "/documents/{document_id}",
        params(
            ("document_id" = String, Path, description = "Document ID")
        ),
        responses(
            (status = 200, body=SuccessResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 404, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn delete_document_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    Path(Params { document_id }): Path<Params>,
) -> Response {
    tracing::info!("delete document");

    match doctrack_db_client::document::soft_delete_document(
        &state.db,
        &user_context.user_id,
        &document_id,
    )
    .await
    {
        Ok(true) => {}
        Ok(false) => {
            return GenericResponse::builder()
                .message("document not found")
                .is_error(true)
                .send(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            tracing::error!(error=?e, document_id=?document_id, "unable to delete document");
            return GenericResponse::builder()
                .message("unable to delete document")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    GenericResponse::builder()
        .data(&GenericSuccessResponse::default())
        .send(StatusCode::OK)
}

/// Permanently deletes a document: the stored file is removed best-effort,
/// then the row goes away.
#[utoipa::path(
        tag = "document",
        delete,
        operation_id = "permanently_delete_document",
        path = "/documents/{document_id}/permanent",
        params(
            ("document_id" = String, Path, description = "Document ID")
        ),
        responses(
            (status = 200, body=SuccessResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 404, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn permanently_delete_document_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    Path(Params { document_id }): Path<Params>,
) -> Response {
    tracing::info!("permanently delete document");

    let file_key = match doctrack_db_client::document::delete_document(
        &state.db,
        &user_context.user_id,
        &document_id,
    )
    .await
    {
        Ok(Some(file_key)) => file_key,
        Ok(None) => {
            return GenericResponse::builder()
                .message("document not found")
                .is_error(true)
                .send(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            tracing::error!(error=?e, document_id=?document_id, "unable to delete document");
            return GenericResponse::builder()
                .message("unable to delete document")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // the row is gone; a failed object delete only leaks storage
    if let Some(file_key) = file_key
        && let Err(e) = state.object_store.delete_object(&file_key).await
    {
        tracing::error!(error=?e, file_key, "unable to delete stored file, continuing");
    }

    GenericResponse::builder()
        .data(&GenericSuccessResponse::default())
        .send(StatusCode::OK)
}
