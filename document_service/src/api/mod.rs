use axum::{Router, routing::get};

pub(crate) mod account;
pub(crate) mod auth_callback;
pub(crate) mod context;
pub(crate) mod documents;
pub(crate) mod health;
pub(crate) mod middleware;
pub(crate) mod scan;
pub(crate) mod swagger;
pub(crate) mod two_factor;

use context::ApiContext;

pub(crate) fn router(state: ApiContext) -> Router {
    Router::new()
        .merge(health::router())
        .merge(swagger::router())
        .route("/auth/callback", get(auth_callback::handler))
        .nest("/documents", documents::router(state.clone()))
        .nest("/scan", scan::router(state.clone()))
        .nest("/two_factor", two_factor::router(state.clone()))
        .nest("/account", account::router(state.clone()))
        .with_state(state)
}

pub(crate) async fn setup_and_serve(state: ApiContext) -> anyhow::Result<()> {
    let port = state.config.port;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(port, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
