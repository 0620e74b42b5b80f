use super::*;

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const TODAY: fn() -> NaiveDate = || day(2026, 8, 7);

#[tokio::test]
async fn scans_a_passport_page() {
    let recognized = lines(&[
        "PASSPORT",
        "Type: P",
        "Passport No: P1234567",
        "Surname: DOE",
        "Given names: JANE",
        "Nationality: British",
        "Date of issue: 10 JAN 2020",
        "Date of expiry: 10 JAN 2030",
        "Issuing Authority: HM Passport Office",
    ]);

    let result = scan(&recognized, None, TODAY()).await;

    assert_eq!(result.expires_at, Some(day(2030, 1, 10)));
    assert_eq!(result.issued_at, Some(day(2020, 1, 10)));
    assert_eq!(result.document_number.as_deref(), Some("P1234567"));
    assert_eq!(result.issuing_authority.as_deref(), Some("HM Passport Office"));
    assert_eq!(result.source, FieldSource::Ocr);
    assert_eq!(
        result.extras.get("nationality").map(String::as_str),
        Some("British")
    );
}

#[tokio::test]
async fn scans_an_insurance_card_without_keywords() {
    let recognized = lines(&[
        "ACME MUTUAL",
        "Policy No: 8841-A2209",
        "Coverage through 01/15/2027",
    ]);

    let result = scan(&recognized, None, TODAY()).await;

    assert_eq!(result.expires_at, Some(day(2027, 1, 15)));
    assert_eq!(result.document_number.as_deref(), Some("8841-A2209"));
    assert_eq!(result.source, FieldSource::Ocr);
}

#[tokio::test]
async fn empty_text_yields_empty_fields() {
    let result = scan(&[], None, TODAY()).await;

    assert_eq!(result.expires_at, None);
    assert_eq!(result.issued_at, None);
    assert_eq!(result.document_number, None);
    assert_eq!(result.issuing_authority, None);
    assert!(result.extras.is_empty());
}
