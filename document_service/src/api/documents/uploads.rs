use crate::api::context::ApiContext;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use model::document::response::UploadTicket;
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;

/// Issues a presigned staging upload for a document file or scan image.
#[utoipa::path(
        tag = "document",
        post,
        path = "/documents/uploads",
        responses(
            (status = 201, body=UploadTicket),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn create_upload_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
) -> Response {
    let key = storage_client::staging_key(&user_context.user_id);

    let upload_url = match state
        .object_store
        .upload_url(&key, state.config.presigned_url_expiry_seconds)
        .await
    {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error=?e, "unable to presign upload url");
            return GenericResponse::builder()
                .message("unable to create upload ticket")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    GenericResponse::builder()
        .data(&UploadTicket { key, upload_url })
        .send(StatusCode::CREATED)
}
