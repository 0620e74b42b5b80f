use super::context::ApiContext;
use crate::config::MIN_OCR_CONFIDENCE;
use axum::{Extension, Router, extract::State, http::StatusCode, response::Response, routing::post};
use chrono::Utc;
use docscan::ScanFields;
use model::document::request::ScanRequest;
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;

pub fn router(state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .route("/", post(scan_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_validation_args.clone(),
            doctrack_auth::middleware::require_session,
        ))
}

/// Recognizes an uploaded document image and guesses its form fields.
///
/// The client stages the image through `POST /documents/uploads` first and
/// passes the staging key here.
#[utoipa::path(
        tag = "scan",
        post,
        path = "/scan",
        request_body = ScanRequest,
        responses(
            (status = 200, body=ScanFields),
            (status = 400, body=GenericErrorResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context, body), fields(user_id=?user_context.user_id))]
pub async fn scan_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    axum::Json(body): axum::Json<ScanRequest>,
) -> Response {
    tracing::info!("scan document image");

    // the staging key must belong to the caller
    if !body
        .upload_key
        .starts_with(&format!("{}/uploads/", user_context.user_id))
    {
        return GenericResponse::builder()
            .message("unknown upload key")
            .is_error(true)
            .send(StatusCode::BAD_REQUEST);
    }

    let image_bytes = match state.object_store.get_bytes(&body.upload_key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error=?e, "unable to fetch staged image");
            return GenericResponse::builder()
                .message("uploaded image not found")
                .is_error(true)
                .send(StatusCode::BAD_REQUEST);
        }
    };

    let recognized = match state.textract_client.detect_text(image_bytes).await {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!(error=?e, "text recognition failed");
            return GenericResponse::builder()
                .message("unable to read the uploaded image")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let lines = recognized
        .into_iter()
        .filter(|line| line.confidence >= MIN_OCR_CONFIDENCE)
        .map(|line| line.text)
        .collect::<Vec<String>>();

    let fields: ScanFields = docscan::scan(
        &lines,
        state.field_extractor.as_deref(),
        Utc::now().date_naive(),
    )
    .await;

    GenericResponse::builder()
        .data(&fields)
        .send(StatusCode::OK)
}
