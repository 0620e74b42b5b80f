use crate::api::context::ApiContext;
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct CallbackParams {
    /// Present on the happy path; the hosted provider already consumed it to
    /// mint the session, so it is only logged here.
    pub code: Option<String>,
    /// Where the client wanted to go before logging in
    pub next: Option<String>,
    /// `recovery` routes to the password-reset page
    #[serde(rename = "type")]
    pub flow_type: Option<String>,
}

/// Lands the browser after the hosted identity provider finishes a login or
/// recovery flow.
#[utoipa::path(
        tag = "auth",
        get,
        path = "/auth/callback",
        params(
            ("code" = Option<String>, Query, description = "Authorization code, consumed upstream"),
            ("next" = Option<String>, Query, description = "Post-login destination"),
            ("type" = Option<String>, Query, description = "Set to `recovery` for password resets"),
        ),
        responses(
            (status = 303),
        )
    )]
#[tracing::instrument(skip(state, params))]
pub async fn handler(
    State(state): State<ApiContext>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    tracing::debug!(has_code = params.code.is_some(), "auth callback");

    let target = redirect_target(
        state.config.vars.frontend_base_url.as_ref(),
        params.next.as_deref(),
        params.flow_type.as_deref(),
    );

    tracing::trace!("redirecting to {target}");

    Redirect::to(&target)
}

/// Builds the post-callback destination.
///
/// `next` is only honored when it stays on the frontend origin; anything
/// else would make the callback an open redirect.
fn redirect_target(frontend_base: &str, next: Option<&str>, flow_type: Option<&str>) -> String {
    let base = frontend_base.trim_end_matches('/');

    if flow_type == Some("recovery") {
        return format!("{base}/reset-password");
    }

    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => {
            format!("{base}{next}")
        }
        Some(next) if next.starts_with(base) => next.to_string(),
        _ => format!("{base}/dashboard"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://app.doctrack.io";

    #[test]
    fn defaults_to_the_dashboard() {
        assert_eq!(
            redirect_target(BASE, None, None),
            "https://app.doctrack.io/dashboard"
        );
    }

    #[test]
    fn recovery_goes_to_reset_password() {
        assert_eq!(
            redirect_target(BASE, Some("/settings"), Some("recovery")),
            "https://app.doctrack.io/reset-password"
        );
    }

    #[test]
    fn relative_next_is_honored() {
        assert_eq!(
            redirect_target(BASE, Some("/documents/doc-1"), None),
            "https://app.doctrack.io/documents/doc-1"
        );
    }

    #[test]
    fn absolute_next_on_the_same_origin_is_honored() {
        assert_eq!(
            redirect_target(BASE, Some("https://app.doctrack.io/settings"), None),
            "https://app.doctrack.io/settings"
        );
    }

    #[test]
    fn foreign_and_scheme_relative_nexts_are_rejected() {
        assert_eq!(
            redirect_target(BASE, Some("https://evil.example.com/"), None),
            "https://app.doctrack.io/dashboard"
        );
        assert_eq!(
            redirect_target(BASE, Some("//evil.example.com/"), None),
            "https://app.doctrack.io/dashboard"
        );
    }

    #[test]
    fn trailing_slash_on_the_base_is_tolerated() {
        assert_eq!(
            redirect_target("https://app.doctrack.io/", None, None),
            "https://app.doctrack.io/dashboard"
        );
    }
}
