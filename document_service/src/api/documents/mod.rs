use super::{context::ApiContext, middleware};
use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;

pub(in crate::api) mod create_document;
pub(in crate::api) mod delete_document;
pub(in crate::api) mod download;
pub(in crate::api) mod get_document;
pub(in crate::api) mod get_user_documents;
pub(in crate::api) mod stats;
pub(in crate::api) mod update_document;
pub(in crate::api) mod uploads;

mod utils;

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
        .route("/", get(get_user_documents::get_user_documents_handler))
        .route("/", post(create_document::create_document_handler))
        .route("/stats", get(stats::get_stats_handler))
        .route("/uploads", post(uploads::create_upload_handler))
        .route("/:document_id", get(get_document::get_document_handler))
        .route(
            "/:document_id",
            patch(update_document::update_document_handler),
        )
        .route(
            "/:document_id",
            delete(delete_document::delete_document_handler),
        )
        .route(
            "/:document_id/permanent",
            delete(delete_document::permanently_delete_document_handler),
        )
        .route(
            "/:document_id/download",
            get(download::get_download_link_handler),
        )
        .layer(authenticated)
}
