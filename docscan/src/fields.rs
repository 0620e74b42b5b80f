use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Labelled values pulled out of the recognized text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct LabelledFields {
    pub document_number: Option<String>,
    pub issuing_authority: Option<String>,
    pub extras: BTreeMap<String, String>,
}

static DOCUMENT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:passport|document|licen[cs]e|card|policy|permit)?\s*(?:no|num|number|#)\.?:?\s*([A-Z0-9][A-Z0-9-]{4,})",
    )
    .expect("document number regex")
});

static ISSUING_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:issuing authority|issued by|authority):?\s+(.{3,})")
        .expect("issuing authority regex")
});

static LABELLED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z /]{2,30}):\s+(\S.*)$").expect("labelled value regex")
});

/// Labels already captured by dedicated fields, not worth repeating in the
/// metadata bag.
const CONSUMED_LABELS: &[&str] = &[
    "date of expiry",
    "date of issue",
    "expiry",
    "expiration",
    "issued by",
    "issuing authority",
    "authority",
];

fn snake_case(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("_")
        .replace('/', "_")
}

/// Pulls the document number, issuing authority and leftover labelled values
/// out of the recognized lines.
pub(crate) fn extract_fields(lines: &[String]) -> LabelledFields {
    let mut fields = LabelledFields::default();

    for line in lines {
        if fields.document_number.is_none()
            && let Some(captures) = DOCUMENT_NUMBER.captures(line)
        {
            let candidate = captures[1].to_string();
            // a bare number run with no digits is usually a word the label
            // regex over-matched
            if candidate.chars().any(|c| c.is_ascii_digit()) {
                fields.document_number = Some(candidate);
            }
        }

        if fields.issuing_authority.is_none()
            && let Some(captures) = ISSUING_AUTHORITY.captures(line)
        {
            fields.issuing_authority = Some(captures[1].trim().to_string());
        }

        if let Some(captures) = LABELLED_VALUE.captures(line) {
            let label = captures[1].trim().to_lowercase();
            if CONSUMED_LABELS.iter().any(|c| label.contains(c)) {
                continue;
            }
            fields
                .extras
                .entry(snake_case(&label))
                .or_insert_with(|| captures[2].trim().to_string());
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_a_labelled_passport_number() {
        let fields = extract_fields(&lines(&["Passport No: P1234567"]));
        assert_eq!(fields.document_number.as_deref(), Some("P1234567"));
    }

    #[test]
    fn number_requires_a_digit() {
        let fields = extract_fields(&lines(&["Document No: UNKNOWN"]));
        assert_eq!(fields.document_number, None);
    }

    #[test]
    fn finds_the_issuing_authority() {
        let fields = extract_fields(&lines(&["Issuing Authority: HM Passport Office"]));
        assert_eq!(
            fields.issuing_authority.as_deref(),
            Some("HM Passport Office")
        );
    }

    #[test]
    fn sweeps_leftover_labels_into_extras() {
        let fields = extract_fields(&lines(&[
            "Nationality: British",
            "Place of birth: London",
            "Date of expiry: 10 JAN 2030",
        ]));

        assert_eq!(fields.extras.get("nationality").map(String::as_str), Some("British"));
        assert_eq!(
            fields.extras.get("place_of_birth").map(String::as_str),
            Some("London")
        );
        // consumed by the date classifier, not repeated here
        assert!(!fields.extras.contains_key("date_of_expiry"));
    }

    #[test]
    fn first_match_wins() {
        let fields = extract_fields(&lines(&["Card No: 11111", "Card No: 22222"]));
        assert_eq!(fields.document_number.as_deref(), Some("11111"));
    }
}
