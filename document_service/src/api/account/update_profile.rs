use crate::api::context::ApiContext;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use model::response::{GenericErrorResponse, GenericResponse, GenericSuccessResponse, SuccessResponse};
use model::user::{UpdateProfileRequest, UserContext};

/// Updates the display name.
#[utoipa::path(
        tag = "account",
        patch,
        path = "/account",
        request_body = UpdateProfileRequest,
        responses(
            (status = 200, body=SuccessResponse),
            (status = 400, body=GenericErrorResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context, body), fields(user_id=?user_context.user_id))]
pub async fn update_profile_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    axum::Json(body): axum::Json<UpdateProfileRequest>,
) -> Response {
    let name = body.name.trim();
    if name.is_empty() {
        return GenericResponse::builder()
            .message("name cannot be empty")
            .is_error(true)
            .send(StatusCode::BAD_REQUEST);
    }

    if let Err(e) =
        doctrack_db_client::user::update_user_name(&state.db, &user_context.user_id, name).await
    {
        tracing::error!(error=?e, "unable to update name");
        return GenericResponse::builder()
            .message("unable to update profile")
            .is_error(true)
            .send(StatusCode::INTERNAL_SERVER_ERROR);
    }

    GenericResponse::builder()
        .data(&GenericSuccessResponse::default())
        .send(StatusCode::OK)
}
