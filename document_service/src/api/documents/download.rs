use crate::api::context::ApiContext;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use model::document::response::DownloadLink;
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Params {
    pub document_id: String,
}

/// Returns a short-lived presigned URL for the document's attached file.
#[utoipa::path(
        tag = "document",
        get,
        path = "/documents/{document_id}/download",
        params(
            ("document_id" = String, Path, description = "Document ID")
        ),
        responses(
            (status = 200, body=DownloadLink),
            (status = 401, body=GenericErrorResponse),
            (status = 404, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn get_download_link_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    Path(Params { document_id }): Path<Params>,
) -> Response {
    let document =
        match doctrack_db_client::document::get_document(&state.db, &user_context.user_id, &document_id)
            .await
        {
            Ok(Some(document)) => document,
            Ok(None) => {
                return GenericResponse::builder()
                    .message("document not found")
                    .is_error(true)
                    .send(StatusCode::NOT_FOUND);
            }
            Err(e) => {
                tracing::error!(error=?e, "unable to get document");
                return GenericResponse::builder()
                    .message("unable to get document")
                    .is_error(true)
                    .send(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

    let Some(file_key) = document.file_key.as_deref() else {
        return GenericResponse::builder()
            .message("document has no attached file")
            .is_error(true)
            .send(StatusCode::NOT_FOUND);
    };

    let download_url = match state
        .object_store
        .download_url(file_key, state.config.presigned_url_expiry_seconds)
        .await
    {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error=?e, "unable to presign download url");
            return GenericResponse::builder()
                .message("unable to create download link")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    GenericResponse::builder()
        .data(&DownloadLink { download_url })
        .send(StatusCode::OK)
}
