use anyhow::Context;
use aws_sdk_s3 as s3;
use s3::types::{Delete, ObjectIdentifier};

/// Deletes a given item from the bucket.
#[tracing::instrument(skip(client))]
pub(crate) async fn delete(client: &s3::Client, bucket: &str, key: &str) -> anyhow::Result<()> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .context(format!("could not delete item {key} from bucket {bucket}"))?;

    Ok(())
}

/// Deletes all items under a given prefix.
#[tracing::instrument(skip(client))]
pub(crate) async fn delete_folder(
    client: &s3::Client,
    bucket: &str,
    prefix: &str,
) -> anyhow::Result<()> {
    let mut to_delete: Vec<String> = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let response = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .set_continuation_token(continuation_token.take())
            .send()
            .await
            .context("could not list folder contents")?;

        for object in response.contents() {
            if let Some(key) = object.key() {
                to_delete.push(key.to_string());
            }
        }

        match response.next_continuation_token() {
            Some(token) => continuation_token = Some(token.to_string()),
            None => break,
        }
    }

    // delete_objects accepts at most 1000 keys per request
    for chunk in to_delete.chunks(1000) {
        tracing::trace!(count = chunk.len(), "deleting chunk");
        delete_objects(client, bucket, chunk).await?;
    }

    Ok(())
}

#[tracing::instrument(skip(client, keys))]
async fn delete_objects(client: &s3::Client, bucket: &str, keys: &[String]) -> anyhow::Result<()> {
    let mut identifiers: Vec<ObjectIdentifier> = Vec::with_capacity(keys.len());

    for key in keys {
        identifiers.push(
            ObjectIdentifier::builder()
                .set_key(Some(key.clone()))
                .build()
                .context("building ObjectIdentifier")?,
        );
    }

    let delete = Delete::builder()
        .set_objects(Some(identifiers))
        .build()
        .context("building Delete")?;

    client
        .delete_objects()
        .bucket(bucket)
        .delete(delete)
        .send()
        .await
        .context("could not delete objects")?;

    Ok(())
}
