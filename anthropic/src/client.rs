use crate::config::Config;
use crate::error::AnthropicError;
use crate::types::{ApiErrorEnvelope, CreateMessageRequest, MessageResponse};
use reqwest::Client as RequestClient;

#[derive(Clone, Debug)]
pub struct Client {
    http_client: RequestClient,
    config: Config,
}

impl Client {
    pub fn with_config(config: Config) -> Self {
        let client = reqwest::Client::builder()
            .default_headers(config.headers.clone())
            .build()
            .expect("reqwest client");
        Self {
            config,
            http_client: client,
        }
    }

    pub fn dangerously_try_from_env() -> Self {
        Self::with_config(Config::dangerously_try_from_env())
    }

    pub fn chat(&'_ self) -> Chat<'_> {
        Chat { inner: self }
    }

    pub(crate) async fn post<I, O>(&self, path: &str, request: &I) -> Result<O, AnthropicError>
    where
        I: serde::Serialize + std::fmt::Debug,
        O: serde::de::DeserializeOwned,
    {
        tracing::debug!(?request, "posting to {path}");

        let response = self
            .http_client
            .post(format!("{}{}", self.config.api_base, path))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return match serde_json::from_str::<ApiErrorEnvelope>(&body) {
                Ok(envelope) => Err(AnthropicError::Api {
                    error_type: envelope.error.error_type,
                    message: envelope.error.message,
                }),
                Err(_) => Err(AnthropicError::Api {
                    error_type: status.to_string(),
                    message: body,
                }),
            };
        }

        Ok(serde_json::from_str::<O>(&body)?)
    }
}

pub struct Chat<'c> {
    inner: &'c Client,
}

impl Chat<'_> {
    /// Creates a completion and waits for the full response.
    pub async fn create(
        &self,
        request: CreateMessageRequest,
    ) -> Result<MessageResponse, AnthropicError> {
        self.inner.post("/v1/messages", &request).await
    }
}
