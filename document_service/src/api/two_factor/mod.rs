use super::{context::ApiContext, middleware};
use axum::{Router, routing::post};
use totp_rs::{Algorithm, Secret, TOTP};
use tower::ServiceBuilder;

pub(in crate::api) mod disable;
pub(in crate::api) mod generate;
pub(in crate::api) mod verify;

/// The issuer shown in authenticator apps.
const OTP_ISSUER: &str = "doctrack";

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
        .route("/generate", post(generate::generate_handler))
        .route("/verify", post(verify::verify_handler))
        .route("/disable", post(disable::disable_handler))
        .layer(authenticated)
}

/// Builds the TOTP instance for a stored base32 secret.
pub(in crate::api) fn totp_for_secret(encoded_secret: &str, email: &str) -> anyhow::Result<TOTP> {
    let secret_bytes = Secret::Encoded(encoded_secret.to_string())
        .to_bytes()
        .map_err(|e| anyhow::anyhow!("invalid stored secret: {e:?}"))?;

    TOTP::new(
        Algorithm::SHA1,
        6,
        1,
        30,
        secret_bytes,
        Some(OTP_ISSUER.to_string()),
        email.to_string(),
    )
    .map_err(|e| anyhow::anyhow!("unable to build totp: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_codes_round_trip() {
        let secret = Secret::generate_secret();
        let totp = totp_for_secret(&secret.to_encoded().to_string(), "user@user.com").unwrap();

        let code = totp.generate_current().unwrap();
        assert!(totp.check_current(&code).unwrap());
        assert!(!totp.check_current("000000").unwrap() || code == "000000");
    }

    #[test]
    fn otpauth_url_names_the_issuer() {
        let secret = Secret::generate_secret();
        let totp = totp_for_secret(&secret.to_encoded().to_string(), "user@user.com").unwrap();

        let url = totp.get_url();
        assert!(url.starts_with("otpauth://totp/"));
        assert!(url.contains("doctrack"));
    }

    #[test]
    fn garbage_secrets_are_rejected() {
        assert!(totp_for_secret("not base32!!!", "user@user.com").is_err());
    }
}
