use crate::api::context::ApiContext;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::{AccountProfile, UserContext};

/// The account page: profile, avatar link and two-factor state.
#[utoipa::path(
        tag = "account",
        get,
        path = "/account",
        responses(
            (status = 200, body=AccountProfile),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn get_profile_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
) -> Response {
    let user = match doctrack_db_client::user::get_user(&state.db, &user_context.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // ensure_user ran before us, so this is a real inconsistency
            tracing::error!("authenticated user has no row");
            return GenericResponse::builder()
                .message("unable to load account")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Err(e) => {
            tracing::error!(error=?e, "unable to load user");
            return GenericResponse::builder()
                .message("unable to load account")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let two_factor_enabled =
        match doctrack_db_client::two_factor::get_two_factor(&state.db, &user_context.user_id).await
        {
            Ok(enrollment) => enrollment.is_some_and(|e| e.enabled),
            Err(e) => {
                tracing::error!(error=?e, "unable to load two-factor state");
                false
            }
        };

    // a dead avatar link degrades to the initials fallback client-side
    let avatar_url = match user.avatar_key.as_deref() {
        Some(avatar_key) => state
            .object_store
            .avatar_url(avatar_key, state.config.presigned_url_expiry_seconds)
            .await
            .map_err(|e| {
                tracing::error!(error=?e, "unable to presign avatar url");
                e
            })
            .ok(),
        None => None,
    };

    let profile = AccountProfile {
        id: user.id,
        email: user.email,
        name: user.name,
        avatar_url,
        two_factor_enabled,
    };

    GenericResponse::builder()
        .data(&profile)
        .send(StatusCode::OK)
}
