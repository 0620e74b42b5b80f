use anyhow::Context;

/// Retrieves the provided key from the bucket.
#[tracing::instrument(skip(client))]
pub(crate) async fn get(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> anyhow::Result<Vec<u8>> {
    let object = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .context(format!("could not get item {key} from bucket {bucket}"))?;

    let bytes = object
        .body
        .collect()
        .await
        .context("could not collect object body")?;

    Ok(bytes.into_bytes().to_vec())
}

/// Checks if a given key exists in the bucket.
#[tracing::instrument(skip(client))]
pub(crate) async fn exists(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> anyhow::Result<bool> {
    match client.head_object().bucket(bucket).key(key).send().await {
        Ok(_) => Ok(true),
        Err(err) => {
            if err
                .as_service_error()
                .is_some_and(|service_err| service_err.is_not_found())
            {
                return Ok(false);
            }
            Err(anyhow::Error::from(err).context(format!("could not head item {key}")))
        }
    }
}
