//! Service-local middleware.

use crate::api::context::ApiContext;
use axum::{
    Extension, Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use model::{response::ErrorResponse, user::UserContext};

/// Upserts the user row for the authenticated caller.
///
/// Accounts are born in the hosted identity provider, so the first
/// authenticated request is the first time this service hears about a user.
#[tracing::instrument(skip_all, fields(user_id=?user_context.user_id))]
pub async fn ensure_user(
    State(state): State<ApiContext>,
    Extension(user_context): Extension<UserContext>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    doctrack_db_client::user::upsert_user(&state.db, &user_context.user_id, &user_context.email)
        .await
        .map_err(|e| {
            tracing::error!(error=?e, "unable to upsert user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "unable to resolve user",
                }),
            )
                .into_response()
        })?;

    Ok(next.run(request).await)
}
