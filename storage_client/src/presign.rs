use anyhow::Context;
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

fn config(expiry_seconds: u64) -> anyhow::Result<PresigningConfig> {
    PresigningConfig::expires_in(Duration::from_secs(expiry_seconds))
        .context("building presigning config")
}

/// Presigned PUT URL for the provided key.
#[tracing::instrument(skip(client))]
pub(crate) async fn put_url(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    expiry_seconds: u64,
) -> anyhow::Result<String> {
    let request = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .presigned(config(expiry_seconds)?)
        .await
        .context(format!("could not presign put for {key}"))?;

    Ok(request.uri().to_string())
}

/// Presigned GET URL for the provided key.
#[tracing::instrument(skip(client))]
pub(crate) async fn get_url(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    expiry_seconds: u64,
) -> anyhow::Result<String> {
    let request = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .presigned(config(expiry_seconds)?)
        .await
        .context(format!("could not presign get for {key}"))?;

    Ok(request.uri().to_string())
}
