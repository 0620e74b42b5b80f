//! Request and response bodies for `POST /v1/messages`.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateMessageRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CreateMessageRequest {
    pub fn new(model: &str, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            max_tokens,
            system: None,
            messages: Vec::new(),
            temperature: None,
        }
    }

    pub fn system(mut self, system: &str) -> Self {
        self.system = Some(system.to_string());
        self
    }

    pub fn user_message(mut self, content: &str) -> Self {
        self.messages.push(Message {
            role: Role::User,
            content: content.to_string(),
        });
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text block
    Text {
        /// The generated text
        text: String,
    },
    /// Anything this client does not consume
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub id: String,
    pub model: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessageResponse {
    /// Concatenates the text blocks of the response.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<&str>>()
            .join("")
    }
}

/// The envelope the API wraps errors in.
#[derive(Deserialize, Debug)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_the_request_shape() {
        let request = CreateMessageRequest::new("claude-3-5-haiku-latest", 512)
            .system("You extract fields.")
            .user_message("PASSPORT ...")
            .temperature(0.0);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-3-5-haiku-latest");
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["system"], "You extract fields.");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["temperature"], 0.0);
    }

    #[test]
    fn collects_response_text() {
        let response: MessageResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-3-5-haiku-latest",
                "content": [
                    {"type": "text", "text": "{\"expiration"},
                    {"type": "text", "text": "_date\": null}"}
                ],
                "stop_reason": "end_turn"
            }"#,
        )
        .unwrap();

        assert_eq!(response.text(), r#"{"expiration_date": null}"#);
    }

    #[test]
    fn tolerates_unknown_content_blocks() {
        let response: MessageResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-3-5-haiku-latest",
                "content": [{"type": "thinking", "thinking": "..."}]
            }"#,
        )
        .unwrap();

        assert_eq!(response.text(), "");
    }
}
