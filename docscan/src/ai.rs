//! Hosted-completion fallback for field extraction.

use anthropic::types::CreateMessageRequest;
use chrono::NaiveDate;

const EXTRACTION_SYSTEM_PROMPT: &str = "You extract fields from OCR text of identity and \
     expiring documents (passports, licenses, leases, insurance policies). \
     Reply with a single JSON object and nothing else, using exactly these \
     keys: expiration_date, issue_date, document_number, issuing_authority. \
     Dates are YYYY-MM-DD strings. Use null for anything not present.";

const MAX_TOKENS: u32 = 512;

/// The fields the completion is asked for.
#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AiFields {
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub issuing_authority: Option<String>,
}

impl AiFields {
    /// The expiration date, when the model produced a parseable one.
    pub fn expires_at(&self) -> Option<NaiveDate> {
        parse_date(self.expiration_date.as_deref()?)
    }

    /// The issue date, when the model produced a parseable one.
    pub fn issued_at(&self) -> Option<NaiveDate> {
        parse_date(self.issue_date.as_deref()?)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Models occasionally wrap the JSON in a code fence despite instructions.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

pub(crate) fn parse_ai_response(text: &str) -> Result<AiFields, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

/// Asks the hosted completion for the structured fields.
pub struct FieldExtractor {
    client: anthropic::Client,
    model: String,
}

impl FieldExtractor {
    pub fn new(client: anthropic::Client, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    /// Extracts fields from recognized text.
    #[tracing::instrument(skip(self, recognized_text))]
    pub async fn extract(&self, recognized_text: &str) -> anyhow::Result<AiFields> {
        let request = CreateMessageRequest::new(&self.model, MAX_TOKENS)
            .system(EXTRACTION_SYSTEM_PROMPT)
            .user_message(recognized_text)
            .temperature(0.0);

        let response = self.client.chat().create(request).await?;
        let fields = parse_ai_response(&response.text())?;

        tracing::debug!(?fields, "completion extracted fields");

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_json_reply() {
        let fields = parse_ai_response(
            r#"{"expiration_date": "2030-01-10", "issue_date": null,
                "document_number": "P1234567", "issuing_authority": null}"#,
        )
        .unwrap();

        assert_eq!(
            fields.expires_at(),
            NaiveDate::from_ymd_opt(2030, 1, 10)
        );
        assert_eq!(fields.issued_at(), None);
        assert_eq!(fields.document_number.as_deref(), Some("P1234567"));
    }

    #[test]
    fn tolerates_a_code_fence() {
        let fields = parse_ai_response(
            "```json\n{\"expiration_date\": \"2027-06-30\"}\n```",
        )
        .unwrap();
        assert_eq!(fields.expires_at(), NaiveDate::from_ymd_opt(2027, 6, 30));
    }

    #[test]
    fn unparseable_dates_become_none() {
        let fields = parse_ai_response(r#"{"expiration_date": "sometime in June"}"#).unwrap();
        assert_eq!(fields.expires_at(), None);
    }
}
