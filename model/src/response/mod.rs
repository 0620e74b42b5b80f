//! JSON response envelopes shared by every doctrack HTTP surface.

use axum::{
    body::Body,
    http::{Response, StatusCode},
};
use serde_json::{Value, json};
use utoipa::ToSchema;

/// A plain json error response for use with axum.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
pub struct ErrorResponse<'a> {
    /// Message to explain failure
    pub message: &'a str,
}

/// The generic `{error, message?, data?}` envelope.
#[derive(serde::Serialize, serde::Deserialize, Eq, PartialEq, Debug, ToSchema)]
pub struct GenericResponse {
    /// Indicates if an error occurred
    pub error: bool,
    /// Message to explain failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Data to be returned
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

impl GenericResponse {
    /// Starts an empty, non-error envelope.
    pub fn builder() -> Self {
        GenericResponse {
            error: false,
            message: None,
            data: None,
        }
    }

    /// Attaches a serializable payload under `data`.
    pub fn data<T: serde::Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    /// Attaches a human-readable message.
    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Flags the envelope as an error.
    pub fn is_error(mut self, is_error: bool) -> Self {
        self.error = is_error;
        self
    }

    /// Renders the envelope with the given status code.
    pub fn send(self, status_code: StatusCode) -> Response<Body> {
        let mut body = serde_json::Map::new();
        body.insert("error".to_string(), json!(self.error));
        if let Some(message) = self.message {
            body.insert("message".to_string(), json!(message));
        }
        if let Some(data) = self.data {
            body.insert("data".to_string(), data);
        }

        Response::builder()
            .status(status_code)
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&Value::Object(body)).unwrap_or_default(),
            ))
            .unwrap_or_default()
    }
}

/// The `{success}` payload used by mutating endpoints.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct GenericSuccessResponse {
    /// Indicates if the request was successful
    pub success: bool,
}

impl Default for GenericSuccessResponse {
    fn default() -> Self {
        Self { success: true }
    }
}

/// Error envelope with a required message.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
pub struct GenericErrorResponse {
    /// Indicates if an error occurred
    pub error: bool,
    /// Message to explain failure
    pub message: String,
}

/// The success envelope as it appears on the wire, for schema generation.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
pub struct SuccessResponse {
    /// Indicates if an error occurred
    pub error: bool,
    /// Data to be returned
    pub data: GenericSuccessResponse,
}

/// Empty response body for clients that always call `response.json()`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema, Default)]
pub struct EmptyResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_absent_fields() {
        let response = GenericResponse::builder().send(StatusCode::OK);
        assert_eq!(response.status(), StatusCode::OK);

        let envelope = GenericResponse::builder()
            .message("nope")
            .is_error(true)
            .data(&GenericSuccessResponse { success: false });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["error"], json!(true));
        assert_eq!(value["message"], json!("nope"));
        assert_eq!(value["data"]["success"], json!(false));
    }
}
