//! Axum middleware that authenticates requests with a session token.

use crate::{JwtValidationArgs, error::DoctrackAuthError, validate_access_token};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use model::user::UserContext;

/// Validates the bearer token and attaches a [UserContext] extension.
#[tracing::instrument(skip_all)]
pub async fn require_session(
    State(args): State<JwtValidationArgs>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| DoctrackAuthError::MissingAuthorization.into_response())?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| DoctrackAuthError::MalformedAuthorization.into_response())?;

    let claims =
        validate_access_token(token, &args).map_err(|err| err.into_response())?;

    request.extensions_mut().insert(UserContext {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccessToken;
    use axum::{Extension, Router, body::Body, http::Request as HttpRequest, routing::get};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use tower::ServiceExt;

    async fn whoami(Extension(user): Extension<UserContext>) -> String {
        user.user_id
    }

    fn router(args: JwtValidationArgs) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(args, require_session))
    }

    fn signed_token() -> String {
        let claims = AccessToken {
            aud: "doctrack".to_string(),
            exp: (chrono::Utc::now().timestamp() + 600) as usize,
            iss: "https://id.example.com".to_string(),
            sub: "doctrack|user@user.com".to_string(),
            email: "user@user.com".to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn test_args() -> JwtValidationArgs {
        JwtValidationArgs::new_from_parts("test-secret", "doctrack", "https://id.example.com")
    }

    #[tokio::test]
    async fn attaches_the_user_context() {
        use http_body_util::BodyExt;

        let response = router(test_args())
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, format!("Bearer {}", signed_token()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"doctrack|user@user.com");
    }

    #[tokio::test]
    async fn rejects_requests_without_a_token() {
        let response = router(test_args())
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
