use crate::api::context::ApiContext;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use model::document::response::UploadTicket;
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;

/// Issues a presigned upload for the user's avatar and records its key.
///
/// The key is stable per user, so re-uploading overwrites in place and no
/// stale object is left behind.
#[utoipa::path(
        tag = "account",
        post,
        path = "/account/avatar",
        responses(
            (status = 201, body=UploadTicket),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn create_avatar_upload_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
) -> Response {
    let key = storage_client::avatar_key(&user_context.user_id);

    let upload_url = match state
        .object_store
        .avatar_upload_url(&key, state.config.presigned_url_expiry_seconds)
        .await
    {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error=?e, "unable to presign avatar upload");
            return GenericResponse::builder()
                .message("unable to create avatar upload")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Err(e) =
        doctrack_db_client::user::set_avatar_key(&state.db, &user_context.user_id, Some(&key)).await
    {
        tracing::error!(error=?e, "unable to record avatar key");
        return GenericResponse::builder()
            .message("unable to create avatar upload")
            .is_error(true)
            .send(StatusCode::INTERNAL_SERVER_ERROR);
    }

    GenericResponse::builder()
        .data(&UploadTicket { key, upload_url })
        .send(StatusCode::CREATED)
}
