use crate::dates::FoundDate;
use chrono::NaiveDate;

const EXPIRY_KEYWORDS: &[&str] = &[
    "date of expiry",
    "expiry",
    "expiration",
    "expires",
    "valid until",
    "valid thru",
    "valid to",
    "exp",
];

const ISSUE_KEYWORDS: &[&str] = &["date of issue", "issued", "issue", "iss"];

/// The dates the keyword pass settled on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClassifiedDates {
    pub expires_at: Option<NaiveDate>,
    pub issued_at: Option<NaiveDate>,
}

/// Scores how strongly the text around a date suggests the given role.
///
/// A keyword on the same line before the date outweighs one on the line
/// above; anything else scores zero.
fn score(same_line_before: &str, previous_line: &str, keywords: &[&str]) -> u32 {
    if keywords.iter().any(|k| same_line_before.contains(k)) {
        return 2;
    }
    if keywords.iter().any(|k| previous_line.contains(k)) {
        return 1;
    }
    0
}

/// Assigns each found date to expiration or issue by keyword proximity.
///
/// When no date classifies as the expiration, the latest future date falls
/// back to it: a lone future date on an insurance card is almost always the
/// renewal date.
pub(crate) fn classify_dates(
    lines: &[String],
    found: &[FoundDate],
    today: NaiveDate,
) -> ClassifiedDates {
    let mut expiry_candidates: Vec<(u32, NaiveDate)> = Vec::new();
    let mut issue_candidates: Vec<(u32, NaiveDate)> = Vec::new();
    let mut unclassified: Vec<NaiveDate> = Vec::new();

    for date in found {
        let line = lines
            .get(date.line_index)
            .map(|l| l.to_lowercase())
            .unwrap_or_default();
        let before = line.get(..date.start.min(line.len())).unwrap_or(&line);
        let previous = date
            .line_index
            .checked_sub(1)
            .and_then(|i| lines.get(i))
            .map(|l| l.to_lowercase())
            .unwrap_or_default();

        let expiry_score = score(before, &previous, EXPIRY_KEYWORDS);
        let issue_score = score(before, &previous, ISSUE_KEYWORDS);

        match expiry_score.cmp(&issue_score) {
            std::cmp::Ordering::Greater => expiry_candidates.push((expiry_score, date.date)),
            std::cmp::Ordering::Less => issue_candidates.push((issue_score, date.date)),
            std::cmp::Ordering::Equal => unclassified.push(date.date),
        }
    }

    // best score wins; ties go to the latest date for expiry and the
    // earliest for issue
    let expires_at = expiry_candidates
        .iter()
        .max_by_key(|(score, date)| (*score, *date))
        .map(|(_, date)| *date);
    let issued_at = issue_candidates
        .iter()
        .max_by_key(|(score, date)| (*score, std::cmp::Reverse(*date)))
        .map(|(_, date)| *date);

    let expires_at = expires_at.or_else(|| {
        unclassified
            .iter()
            .filter(|date| **date > today)
            .max()
            .copied()
    });

    ClassifiedDates {
        expires_at,
        issued_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::find_dates;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const TODAY: fn() -> NaiveDate = || day(2026, 8, 7);

    fn classify(texts: &[&str]) -> ClassifiedDates {
        let lines = lines(texts);
        let found = find_dates(&lines);
        classify_dates(&lines, &found, TODAY())
    }

    #[test]
    fn keywords_on_the_same_line_win() {
        let classified = classify(&[
            "Date of issue: 10 JAN 2020",
            "Date of expiry: 10 JAN 2030",
        ]);
        assert_eq!(classified.expires_at, Some(day(2030, 1, 10)));
        assert_eq!(classified.issued_at, Some(day(2020, 1, 10)));
    }

    #[test]
    fn keywords_on_the_previous_line_count() {
        let classified = classify(&["EXPIRATION DATE", "06/30/2027"]);
        assert_eq!(classified.expires_at, Some(day(2027, 6, 30)));
        assert_eq!(classified.issued_at, None);
    }

    #[test]
    fn lone_future_date_falls_back_to_expiration() {
        let classified = classify(&["POLICY 8841-A", "Coverage through 01/15/2027"]);
        assert_eq!(classified.expires_at, Some(day(2027, 1, 15)));
    }

    #[test]
    fn past_dates_do_not_fall_back() {
        let classified = classify(&["Member since 03/01/2019"]);
        assert_eq!(classified.expires_at, None);
        assert_eq!(classified.issued_at, None);
    }

    #[test]
    fn latest_future_date_is_preferred_for_fallback() {
        let classified = classify(&["From 01/02/2026 to 01/02/2027"]);
        assert_eq!(classified.expires_at, Some(day(2027, 1, 2)));
    }

    #[test]
    fn abbreviated_exp_is_recognized() {
        let classified = classify(&["EXP 08/31/2028", "ISS 08/31/2020"]);
        assert_eq!(classified.expires_at, Some(day(2028, 8, 31)));
        assert_eq!(classified.issued_at, Some(day(2020, 8, 31)));
    }
}
