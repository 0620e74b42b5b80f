use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use model::response::ErrorResponse;
use thiserror::Error;

/// Errors produced while authenticating a request.
#[derive(Debug, Error)]
pub enum DoctrackAuthError {
    /// No Authorization header was provided
    #[error("missing authorization header")]
    MissingAuthorization,
    /// The Authorization header was not a bearer token
    #[error("malformed authorization header")]
    MalformedAuthorization,
    /// The token failed validation
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for DoctrackAuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error=?self, "rejecting unauthenticated request");
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                message: "unauthorized",
            }),
        )
            .into_response()
    }
}
