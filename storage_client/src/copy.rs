use anyhow::Context;

/// Copies an object to another key in the same bucket.
#[tracing::instrument(skip(client))]
pub(crate) async fn copy(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    source_key: &str,
    destination_key: &str,
) -> anyhow::Result<()> {
    client
        .copy_object()
        .bucket(bucket)
        .copy_source(format!("{bucket}/{source_key}"))
        .key(destination_key)
        .send()
        .await
        .context(format!(
            "could not copy {source_key} to {destination_key} in bucket {bucket}"
        ))?;

    Ok(())
}
