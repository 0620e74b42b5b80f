use super::*;
use chrono::{TimeZone, Utc};
use model::document::DocumentKind;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn document(id: &str, title: &str, kind: DocumentKind, expires_at: Option<NaiveDate>) -> Document {
    Document {
        id: id.to_string(),
        owner: "doctrack|user@user.com".to_string(),
        title: title.to_string(),
        kind: kind.to_string(),
        expires_at,
        remind_at: None,
        notes: None,
        document_number: None,
        issued_at: None,
        issuing_authority: None,
        file_key: None,
        file_name: None,
        file_mime_type: None,
        file_size_bytes: None,
        metadata: serde_json::json!({}),
        last_reminder_at: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn fixture() -> Vec<Document> {
    vec![
        document(
            "passport",
            "Passport",
            DocumentKind::Passport,
            Some(day(2030, 5, 1)),
        ),
        document(
            "lease",
            "Apartment lease",
            DocumentKind::Lease,
            Some(day(2026, 8, 20)),
        ),
        document(
            "insurance",
            "Car insurance",
            DocumentKind::Insurance,
            Some(day(2026, 7, 1)),
        ),
        document("notes", "Warranty card", DocumentKind::Other, None),
    ]
}

const TODAY: fn() -> NaiveDate = || day(2026, 8, 7);

#[test]
fn empty_filters_keep_everything() {
    let filters = DocumentFilters::default();
    assert!(filters.is_empty());

    let kept = apply(fixture(), &filters, Sort::default(), TODAY());
    assert_eq!(kept.len(), 4);
}

#[test]
fn filters_by_kind() {
    let filters = DocumentFilters {
        kinds: vec![DocumentKind::Lease, DocumentKind::Insurance],
        ..Default::default()
    };

    let kept = apply(fixture(), &filters, Sort::default(), TODAY());
    let ids: Vec<&str> = kept.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["insurance", "lease"]);
}

#[test]
fn filters_by_derived_status() {
    let filters = DocumentFilters {
        statuses: vec![DocumentStatus::ExpiringSoon],
        ..Default::default()
    };

    let kept = apply(fixture(), &filters, Sort::default(), TODAY());
    let ids: Vec<&str> = kept.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["lease"]);
}

#[test]
fn searches_title_and_notes() {
    let mut documents = fixture();
    documents[3].notes = Some("Blender warranty, extended".to_string());

    let filters = DocumentFilters {
        search: Some("WARRANTY".to_string()),
        ..Default::default()
    };

    let kept = apply(documents, &filters, Sort::default(), TODAY());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "notes");
}

#[test]
fn no_expiry_sorts_last_in_both_directions() {
    for order in [SortOrder::Asc, SortOrder::Desc] {
        let sort = Sort {
            key: SortKey::ExpiresAt,
            order,
        };
        let kept = apply(fixture(), &DocumentFilters::default(), sort, TODAY());
        assert_eq!(kept.last().unwrap().id, "notes");
    }
}

#[test]
fn sorts_by_title_descending() {
    let sort = Sort {
        key: SortKey::Title,
        order: SortOrder::Desc,
    };
    let kept = apply(fixture(), &DocumentFilters::default(), sort, TODAY());
    let titles: Vec<&str> = kept.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Warranty card", "Passport", "Car insurance", "Apartment lease"]
    );
}

#[test]
fn parses_comma_separated_lists() {
    let kinds: Vec<DocumentKind> = parse_list(Some("passport, lease,bogus"));
    assert_eq!(kinds, vec![DocumentKind::Passport, DocumentKind::Lease]);

    let statuses: Vec<DocumentStatus> = parse_list(None);
    assert!(statuses.is_empty());
}
