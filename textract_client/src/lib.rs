//! Hosted OCR for doctrack: recognizes the text on an uploaded document
//! image via Textract's `DetectDocumentText`.

use anyhow::Context;
use aws_sdk_textract as textract;
use textract::types::{BlockType, Document};

/// One recognized line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// The recognized text
    pub text: String,
    /// Recognition confidence, 0-100
    pub confidence: f32,
}

#[derive(Clone, Debug)]
pub struct TextractClient {
    inner: textract::Client,
}

impl TextractClient {
    pub fn new(inner: textract::Client) -> Self {
        Self { inner }
    }

    /// Recognizes the text on an image, returning its lines top to bottom.
    #[tracing::instrument(skip(self, image_bytes), fields(image_len = image_bytes.len()))]
    pub async fn detect_text(&self, image_bytes: Vec<u8>) -> anyhow::Result<Vec<TextLine>> {
        let document = Document::builder()
            .bytes(textract::primitives::Blob::new(image_bytes))
            .build();

        let response = self
            .inner
            .detect_document_text()
            .document(document)
            .send()
            .await
            .context("could not detect document text")?;

        let lines = response
            .blocks()
            .iter()
            .filter(|block| block.block_type() == Some(&BlockType::Line))
            .filter_map(|block| {
                Some(TextLine {
                    text: block.text()?.to_string(),
                    confidence: block.confidence().unwrap_or_default(),
                })
            })
            .collect::<Vec<TextLine>>();

        tracing::debug!(line_count = lines.len(), "recognized text lines");

        Ok(lines)
    }
}
