use crate::config::Config;
use axum::extract::FromRef;
use docscan::FieldExtractor;
use doctrack_auth::JwtValidationArgs;
use mail_client::Mailer;
use sqlx::PgPool;
use std::sync::Arc;
use storage_client::ObjectStore;
use textract_client::TextractClient;

#[derive(Clone, FromRef)]
pub(crate) struct ApiContext {
    pub db: PgPool,
    pub object_store: Arc<ObjectStore>,
    pub textract_client: Arc<TextractClient>,
    pub mailer: Arc<Mailer>,
    pub field_extractor: Option<Arc<FieldExtractor>>,
    pub jwt_validation_args: JwtValidationArgs,
    pub config: Arc<Config>,
}
