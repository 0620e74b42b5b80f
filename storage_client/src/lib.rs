//! Object storage for doctrack: document attachments and avatars.
//!
//! Attachments live in the documents bucket under
//! `{user_id}/uploads/{uuid}` while staged and
//! `{user_id}/documents/{document_id}/{file_name}` once attached. Avatars
//! live in their own bucket under `{user_id}/avatar`.

mod copy;
mod delete;
mod get;
mod keys;
mod presign;

pub use keys::{avatar_key, document_key, staging_key};

/// The two buckets the platform writes to.
#[derive(Clone, Debug)]
pub struct ObjectStore {
    inner: aws_sdk_s3::Client,
    documents_bucket: String,
    avatars_bucket: String,
}

impl ObjectStore {
    pub fn new(inner: aws_sdk_s3::Client, documents_bucket: &str, avatars_bucket: &str) -> Self {
        Self {
            inner,
            documents_bucket: documents_bucket.to_string(),
            avatars_bucket: avatars_bucket.to_string(),
        }
    }

    /// Presigned PUT URL for a staged document upload.
    #[tracing::instrument(skip(self))]
    pub async fn upload_url(&self, key: &str, expiry_seconds: u64) -> anyhow::Result<String> {
        presign::put_url(&self.inner, &self.documents_bucket, key, expiry_seconds).await
    }

    /// Presigned GET URL for a document attachment.
    #[tracing::instrument(skip(self))]
    pub async fn download_url(&self, key: &str, expiry_seconds: u64) -> anyhow::Result<String> {
        presign::get_url(&self.inner, &self.documents_bucket, key, expiry_seconds).await
    }

    /// Downloads a staged object, for the scan pipeline.
    #[tracing::instrument(skip(self))]
    pub async fn get_bytes(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        get::get(&self.inner, &self.documents_bucket, key).await
    }

    /// Checks that a staged upload actually arrived.
    #[tracing::instrument(skip(self))]
    pub async fn exists(&self, key: &str) -> anyhow::Result<bool> {
        get::exists(&self.inner, &self.documents_bucket, key).await
    }

    /// Moves a staged upload to its final per-document key.
    #[tracing::instrument(skip(self))]
    pub async fn promote_upload(
        &self,
        staging_key: &str,
        document_key: &str,
    ) -> anyhow::Result<()> {
        copy::copy(
            &self.inner,
            &self.documents_bucket,
            staging_key,
            document_key,
        )
        .await?;
        delete::delete(&self.inner, &self.documents_bucket, staging_key).await
    }

    /// Deletes a document attachment.
    #[tracing::instrument(skip(self))]
    pub async fn delete_object(&self, key: &str) -> anyhow::Result<()> {
        delete::delete(&self.inner, &self.documents_bucket, key).await
    }

    /// Deletes everything a user has in the documents bucket.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user_folder(&self, user_id: &str) -> anyhow::Result<()> {
        delete::delete_folder(&self.inner, &self.documents_bucket, &format!("{user_id}/")).await
    }

    /// Presigned PUT URL for an avatar upload.
    #[tracing::instrument(skip(self))]
    pub async fn avatar_upload_url(&self, key: &str, expiry_seconds: u64) -> anyhow::Result<String> {
        presign::put_url(&self.inner, &self.avatars_bucket, key, expiry_seconds).await
    }

    /// Presigned GET URL for an avatar.
    #[tracing::instrument(skip(self))]
    pub async fn avatar_url(&self, key: &str, expiry_seconds: u64) -> anyhow::Result<String> {
        presign::get_url(&self.inner, &self.avatars_bucket, key, expiry_seconds).await
    }

    /// Deletes an avatar object.
    #[tracing::instrument(skip(self))]
    pub async fn delete_avatar(&self, key: &str) -> anyhow::Result<()> {
        delete::delete(&self.inner, &self.avatars_bucket, key).await
    }
}
