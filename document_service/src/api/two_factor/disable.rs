use crate::api::context::ApiContext;
use crate::api::two_factor::totp_for_secret;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use mail_client::SecurityEvent;
use model::response::{GenericErrorResponse, GenericResponse};
use model::two_factor::{TwoFactorCodeRequest, TwoFactorStatusResponse};
use model::user::UserContext;

/// Turns two-factor off. A valid current code is required so a hijacked
/// session cannot silently weaken the account.
#[utoipa::path(
        tag = "two_factor",
        post,
        path = "/two_factor/disable",
        request_body = TwoFactorCodeRequest,
        responses(
            (status = 200, body=TwoFactorStatusResponse),
            (status = 400, body=GenericErrorResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context, body), fields(user_id=?user_context.user_id))]
pub async fn disable_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    axum::Json(body): axum::Json<TwoFactorCodeRequest>,
) -> Response {
    tracing::info!("disable two-factor");

    let enrollment =
        match doctrack_db_client::two_factor::get_two_factor(&state.db, &user_context.user_id).await
        {
            Ok(Some(enrollment)) if enrollment.enabled => enrollment,
            Ok(_) => {
                return GenericResponse::builder()
                    .message("two-factor is not enabled")
                    .is_error(true)
                    .send(StatusCode::BAD_REQUEST);
            }
            Err(e) => {
                tracing::error!(error=?e, "unable to load enrollment");
                return GenericResponse::builder()
                    .message("unable to disable two-factor")
                    .is_error(true)
                    .send(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

    let accepted = totp_for_secret(&enrollment.secret, &user_context.email)
        .and_then(|totp| {
            totp.check_current(body.code.trim())
                .map_err(anyhow::Error::from)
        })
        .unwrap_or(false);

    if !accepted {
        return GenericResponse::builder()
            .message("invalid code")
            .is_error(true)
            .send(StatusCode::BAD_REQUEST);
    }

    if let Err(e) = doctrack_db_client::two_factor::disable(&state.db, &user_context.user_id).await
    {
        tracing::error!(error=?e, "unable to disable two-factor");
        return GenericResponse::builder()
            .message("unable to disable two-factor")
            .is_error(true)
            .send(StatusCode::INTERNAL_SERVER_ERROR);
    }

    if let Err(e) = state
        .mailer
        .send_security_alert(&user_context.email, SecurityEvent::TwoFactorDisabled)
        .await
    {
        tracing::error!(error=?e, "unable to send security alert");
    }

    GenericResponse::builder()
        .data(&TwoFactorStatusResponse { enabled: false })
        .send(StatusCode::OK)
}
