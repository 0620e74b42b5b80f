use crate::api::context::ApiContext;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use model::document::response::DocumentView;
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Params {
    pub document_id: String,
}

/// Fetches a single document.
#[utoipa::path(
        tag = "document",
        get,
        path = "/documents/{document_id}",
        params(
            ("document_id" = String, Path, description = "Document ID")
        ),
        responses(
            (status = 200, body=DocumentView),
            (status = 401, body=GenericErrorResponse),
            (status = 404, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn get_document_handler(
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

    let view = DocumentView::new(document, Utc::now().date_naive());

    GenericResponse::builder().data(&view).send(StatusCode::OK)
}
