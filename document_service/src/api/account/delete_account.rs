use crate::api::context::ApiContext;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use model::response::{GenericErrorResponse, GenericResponse, GenericSuccessResponse, SuccessResponse};
use model::user::UserContext;

/// Deletes the account: every stored file is purged best-effort, then the
/// user row goes away and documents cascade with it.
///
/// The identity-provider account itself is managed by the hosted provider;
/// this only removes what doctrack stores.
#[utoipa::path(
        tag = "account",
        delete,
        path = "/account",
        responses(
            (status = 200, body=SuccessResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn delete_account_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
) -> Response {
    tracing::info!("delete account");

    // purge storage first while the rows still reference it; failures only
    // leak objects
    if let Err(e) = state
        .object_store
        .delete_user_folder(&user_context.user_id)
        .await
    {
        tracing::error!(error=?e, "unable to purge document storage, continuing");
    }

    if let Ok(Some(user)) =
        doctrack_db_client::user::get_user(&state.db, &user_context.user_id).await
        && let Some(avatar_key) = user.avatar_key.as_deref()
        && let Err(e) = state.object_store.delete_avatar(avatar_key).await
    {
        tracing::error!(error=?e, "unable to delete avatar, continuing");
    }

    match doctrack_db_client::user::delete_user(&state.db, &user_context.user_id).await {
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error=?e, "unable to delete account");
            return GenericResponse::builder()
                .message("unable to delete account")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    GenericResponse::builder()
        .data(&GenericSuccessResponse::default())
        .send(StatusCode::OK)
}
