use crate::api::{account, auth_callback, documents, health, scan, two_factor};
use axum::{Json, Router, routing::get};
use docscan::{FieldSource, ScanFields};
use model::document::request::{
    CreateDocumentRequest, ScanRequest, StagedUpload, UpdateDocumentRequest,
};
use model::document::response::{
    DashboardStats, DocumentListResponse, DocumentView, DownloadLink, UpcomingExpiration,
    UploadTicket,
};
use model::document::{DocumentKind, DocumentStatus, FileRef};
use model::response::{EmptyResponse, GenericErrorResponse, GenericSuccessResponse, SuccessResponse};
use model::two_factor::{GenerateTwoFactorResponse, TwoFactorCodeRequest, TwoFactorStatusResponse};
use model::user::{AccountProfile, UpdateProfileRequest};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_handler,
        auth_callback::handler,
        documents::create_document::create_document_handler,
        documents::get_user_documents::get_user_documents_handler,
        documents::get_document::get_document_handler,
        documents::update_document::update_document_handler,
        documents::delete_document::delete_document_handler,
        documents::delete_document::permanently_delete_document_handler,
        documents::download::get_download_link_handler,
        documents::uploads::create_upload_handler,
        documents::stats::get_stats_handler,
        scan::scan_handler,
        two_factor::generate::generate_handler,
        two_factor::verify::verify_handler,
        two_factor::disable::disable_handler,
        account::get_profile::get_profile_handler,
        account::delete_account::delete_account_handler,
        account::update_profile::update_profile_handler,
        account::avatar::create_avatar_upload_handler,
    ),
    components(
        schemas(
            EmptyResponse,
            GenericErrorResponse,
            GenericSuccessResponse,
            SuccessResponse,
            DocumentKind,
            DocumentStatus,
            FileRef,
            CreateDocumentRequest,
            UpdateDocumentRequest,
            StagedUpload,
            ScanRequest,
            ScanFields,
            FieldSource,
            DocumentView,
            DocumentListResponse,
            DashboardStats,
            UpcomingExpiration,
            UploadTicket,
            DownloadLink,
            GenerateTwoFactorResponse,
            TwoFactorCodeRequest,
            TwoFactorStatusResponse,
            AccountProfile,
            UpdateProfileRequest,
        ),
    ),
    tags(
        (name = "doctrack", description = "Document expiration tracking")
    )
)]
pub struct ApiDoc;

pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
