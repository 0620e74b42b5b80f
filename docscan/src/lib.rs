//! Turns recognized document text into form-ready fields.
//!
//! The pipeline is deliberately simple: regexes find candidate dates,
//! keyword proximity decides which date is the expiration versus the issue
//! date, label heuristics pick up the document number and issuing authority,
//! and a hosted completion fills in whatever the heuristics missed.

pub mod ai;
mod classify;
mod dates;
mod fields;

pub use ai::FieldExtractor;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Which engine produced the scan result.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Regex and keyword heuristics over the recognized text
    Ocr,
    /// Heuristics, backfilled by the hosted completion
    OcrWithAi,
}

/// The fields a scan prefills the document form with.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct ScanFields {
    /// The guessed expiration date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    /// The guessed issue date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<NaiveDate>,
    /// The guessed document number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// The guessed issuing authority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_authority: Option<String>,
    /// Other labelled values worth keeping
    pub extras: BTreeMap<String, String>,
    /// Which engine produced the result
    pub source: FieldSource,
}

/// Runs the heuristics over recognized lines, falling back to the hosted
/// completion when no expiration date was found.
///
/// Fallback failures are non-fatal: the heuristic result is returned as-is.
pub async fn scan(
    lines: &[String],
    extractor: Option<&FieldExtractor>,
    today: NaiveDate,
) -> ScanFields {
    let found = dates::find_dates(lines);
    let classified = classify::classify_dates(lines, &found, today);
    let labelled = fields::extract_fields(lines);

    let mut result = ScanFields {
        expires_at: classified.expires_at,
        issued_at: classified.issued_at,
        document_number: labelled.document_number,
        issuing_authority: labelled.issuing_authority,
        extras: labelled.extras,
        source: FieldSource::Ocr,
    };

    if result.expires_at.is_some() {
        return result;
    }

    let Some(extractor) = extractor else {
        return result;
    };

    match extractor.extract(&lines.join("\n")).await {
        Ok(ai_fields) => {
            result.expires_at = result.expires_at.or(ai_fields.expires_at());
            result.issued_at = result.issued_at.or(ai_fields.issued_at());
            result.document_number = result.document_number.or(ai_fields.document_number);
            result.issuing_authority = result.issuing_authority.or(ai_fields.issuing_authority);
            result.source = FieldSource::OcrWithAi;
        }
        Err(err) => {
            tracing::warn!(error=?err, "field extraction fallback failed");
        }
    }

    result
}

#[cfg(test)]
mod tests;
