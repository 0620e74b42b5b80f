use crate::api::context::ApiContext;
use crate::api::two_factor::totp_for_secret;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use model::response::{GenericErrorResponse, GenericResponse};
use model::two_factor::GenerateTwoFactorResponse;
use model::user::UserContext;
use totp_rs::Secret;

/// Starts two-factor enrollment: generates a fresh secret and returns it
/// with its otpauth URL for QR display. Enrollment stays disabled until the
/// first code verifies.
#[utoipa::path(
        tag = "two_factor",
        post,
        path = "/two_factor/generate",
        responses(
            (status = 200, body=GenerateTwoFactorResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn generate_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
) -> Response {
    tracing::info!("generate two-factor secret");

    let secret = Secret::generate_secret().to_encoded().to_string();

    let totp = match totp_for_secret(&secret, &user_context.email) {
        Ok(totp) => totp,
        Err(e) => {
            tracing::error!(error=?e, "unable to build totp");
            return GenericResponse::builder()
                .message("unable to generate two-factor secret")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Err(e) =
        doctrack_db_client::two_factor::upsert_secret(&state.db, &user_context.user_id, &secret)
            .await
    {
        tracing::error!(error=?e, "unable to store two-factor secret");
        return GenericResponse::builder()
            .message("unable to generate two-factor secret")
            .is_error(true)
            .send(StatusCode::INTERNAL_SERVER_ERROR);
    }

    GenericResponse::builder()
        .data(&GenerateTwoFactorResponse {
            otpauth_url: totp.get_url(),
            secret,
        })
        .send(StatusCode::OK)
}
