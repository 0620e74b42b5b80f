use crate::api::context::ApiContext;
use crate::api::two_factor::totp_for_secret;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use mail_client::SecurityEvent;
use model::response::{GenericErrorResponse, GenericResponse};
use model::two_factor::{TwoFactorCodeRequest, TwoFactorStatusResponse};
use model::user::UserContext;

/// Completes enrollment: the first valid code enables two-factor.
#[utoipa::path(
        tag = "two_factor",
        post,
        path = "/two_factor/verify",
        request_body = TwoFactorCodeRequest,
        responses(
            (status = 200, body=TwoFactorStatusResponse),
            (status = 400, body=GenericErrorResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context, body), fields(user_id=?user_context.user_id))]
pub async fn verify_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    axum::Json(body): axum::Json<TwoFactorCodeRequest>,
) -> Response {
    tracing::info!("verify two-factor code");

    let enrollment =
        match doctrack_db_client::two_factor::get_two_factor(&state.db, &user_context.user_id).await
        {
            Ok(Some(enrollment)) => enrollment,
            Ok(None) => {
                return GenericResponse::builder()
                    .message("no two-factor enrollment to verify")
                    .is_error(true)
                    .send(StatusCode::BAD_REQUEST);
            }
            Err(e) => {
                tracing::error!(error=?e, "unable to load enrollment");
                return GenericResponse::builder()
                    .message("unable to verify code")
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

    if let Err(e) = doctrack_db_client::two_factor::enable(&state.db, &user_context.user_id).await {
        tracing::error!(error=?e, "unable to enable two-factor");
        return GenericResponse::builder()
            .message("unable to enable two-factor")
            .is_error(true)
            .send(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // the notice is best-effort
    if let Err(e) = state
        .mailer
        .send_security_alert(&user_context.email, SecurityEvent::TwoFactorEnabled)
        .await
    {
        tracing::error!(error=?e, "unable to send security alert");
    }

    GenericResponse::builder()
        .data(&TwoFactorStatusResponse { enabled: true })
        .send(StatusCode::OK)
}
