mod config;
mod handler;

use anyhow::Context;
use chrono::Utc;
use config::Config;
use doctrack_entrypoint::DoctrackEntrypoint;
use mail_client::Mailer;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    DoctrackEntrypoint::default().init();
    tracing::trace!("starting reminder worker");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    // a sweep only ever needs a couple of connections
    let db = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(3)
        .connect(&config.vars.database_url)
        .await
        .context("could not connect to db")?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region("us-east-1")
        .load()
        .await;

    let mailer = Mailer::new(aws_sdk_sesv2::Client::new(&aws_config))
        .from_email(config.vars.reminder_from_email.as_ref());

    let mut interval = tokio::time::interval(Duration::from_secs(config.poll_interval_seconds));

    loop {
        interval.tick().await;

        let today = Utc::now().date_naive();
        match handler::process_due_reminders(&db, &mailer, today).await {
            Ok(sent) if sent > 0 => tracing::info!(sent, "reminder sweep complete"),
            Ok(_) => {}
            Err(e) => tracing::error!(error=?e, "reminder sweep failed"),
        }
    }
}
