use crate::{api::context::ApiContext, config::Config};
use anyhow::Context;
use docscan::FieldExtractor;
use doctrack_auth::JwtValidationArgs;
use doctrack_entrypoint::DoctrackEntrypoint;
use doctrack_env::Environment;
use mail_client::Mailer;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use storage_client::ObjectStore;
use textract_client::TextractClient;

mod api;
mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    DoctrackEntrypoint::default().init();

    let config = Config::from_env().context("expected to be able to generate config")?;

    tracing::trace!("initialized config");

    let (min_connections, max_connections): (u32, u32) = match config.environment {
        Environment::Production => (10, 50),
        Environment::Develop => (3, 20),
        Environment::Local => (3, 10),
    };

    let db = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect(&config.vars.database_url)
        .await
        .context("could not connect to db")?;

    tracing::trace!(
        min_connections,
        max_connections,
        "initialized db connection"
    );

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region("us-east-1")
        .load()
        .await;

    let object_store = ObjectStore::new(
        aws_sdk_s3::Client::new(&aws_config),
        config.vars.documents_bucket.as_ref(),
        config.vars.avatars_bucket.as_ref(),
    );
    tracing::trace!("initialized object store");

    let textract_client = TextractClient::new(aws_sdk_textract::Client::new(&aws_config));
    tracing::trace!("initialized textract client");

    let mailer = Mailer::new(aws_sdk_sesv2::Client::new(&aws_config))
        .from_email(config.vars.reminder_from_email.as_ref());
    tracing::trace!("initialized mailer");

    // The scan fallback is optional: without an api key, scans run on
    // heuristics alone.
    let field_extractor = match config::AnthropicApiKey::new() {
        Ok(api_key) => {
            let client = anthropic::Client::with_config(anthropic::Config::new(api_key.as_ref()));
            Some(Arc::new(FieldExtractor::new(
                client,
                &config.extraction_model,
            )))
        }
        Err(_) => {
            tracing::info!("no anthropic api key configured, scan fallback disabled");
            None
        }
    };

    let jwt_validation_args =
        JwtValidationArgs::new_from_env().context("jwt validation env vars should be set")?;

    let api_context = ApiContext {
        db,
        object_store: Arc::new(object_store),
        textract_client: Arc::new(textract_client),
        mailer: Arc::new(mailer),
        field_extractor,
        jwt_validation_args,
        config: Arc::new(config),
    };

    api::setup_and_serve(api_context).await?;

    Ok(())
}
