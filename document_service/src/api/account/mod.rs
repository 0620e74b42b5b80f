use super::{context::ApiContext, middleware};
use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;

pub(in crate::api) mod avatar;
pub(in crate::api) mod delete_account;
pub(in crate::api) mod get_profile;
pub(in crate::api) mod update_profile;

pub fn router(state: ApiContext) -> Router<ApiContext> {
    let authenticated = ServiceBuilder::new()
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_validation_args.clone(),
            doctrack_auth::middleware::require_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::ensure_user,
        ));

    Router::new()
        .route("/", get(get_profile::get_profile_handler))
        .route("/", patch(update_profile::update_profile_handler))
        .route("/", delete(delete_account::delete_account_handler))
        .route("/avatar", post(avatar::create_avatar_upload_handler))
        .layer(authenticated)
}
