use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// A date recognized somewhere in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundDate {
    /// The parsed date
    pub date: NaiveDate,
    /// Which line it was found on
    pub line_index: usize,
    /// Byte offset of the match within the line
    pub start: usize,
}

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("iso date regex"));

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})[/.](\d{1,2})[/.](\d{2,4})\b").expect("numeric date regex")
});

static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{2,4})\b",
    )
    .expect("day month year regex")
});

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2}),?\s+(\d{4})\b",
    )
    .expect("month day year regex")
});

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn normalize_year(year: i32) -> i32 {
    if year < 100 {
        if year < 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

/// Resolves an ambiguous `a/b/year` pair: a first segment that cannot be a
/// month is the day, otherwise month-first wins.
fn resolve_numeric(a: u32, b: u32, year: i32) -> Option<NaiveDate> {
    let (month, day) = if a > 12 { (b, a) } else { (a, b) };
    NaiveDate::from_ymd_opt(normalize_year(year), month, day)
}

fn parse_iso(captures: &regex::Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        captures[1].parse().ok()?,
        captures[2].parse().ok()?,
        captures[3].parse().ok()?,
    )
}

fn parse_numeric(captures: &regex::Captures<'_>) -> Option<NaiveDate> {
    resolve_numeric(
        captures[1].parse().ok()?,
        captures[2].parse().ok()?,
        captures[3].parse().ok()?,
    )
}

fn parse_day_month_year(captures: &regex::Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        normalize_year(captures[3].parse().ok()?),
        month_number(&captures[2])?,
        captures[1].parse().ok()?,
    )
}

fn parse_month_day_year(captures: &regex::Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        captures[3].parse().ok()?,
        month_number(&captures[1])?,
        captures[2].parse().ok()?,
    )
}

/// Finds every recognizable date in the given lines, in reading order.
pub fn find_dates(lines: &[String]) -> Vec<FoundDate> {
    type Parser = fn(&regex::Captures<'_>) -> Option<NaiveDate>;
    let patterns: [(&Regex, Parser); 4] = [
        (LazyLock::force(&ISO_DATE), parse_iso),
        (LazyLock::force(&NUMERIC_DATE), parse_numeric),
        (LazyLock::force(&DAY_MONTH_YEAR), parse_day_month_year),
        (LazyLock::force(&MONTH_DAY_YEAR), parse_month_day_year),
    ];

    let mut found: Vec<FoundDate> = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        for (pattern, parse) in patterns {
            for captures in pattern.captures_iter(line) {
                push_found(&mut found, parse(&captures), line_index, &captures);
            }
        }
    }

    found
}

fn push_found(
    found: &mut Vec<FoundDate>,
    date: Option<NaiveDate>,
    line_index: usize,
    captures: &regex::Captures<'_>,
) {
    let Some(date) = date else { return };
    let start = captures.get(0).map(|m| m.start()).unwrap_or_default();

    // the same text can match more than one pattern
    let duplicate = found
        .iter()
        .any(|f| f.line_index == line_index && f.start == start);
    if !duplicate {
        found.push(FoundDate {
            date,
            line_index,
            start,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn finds_iso_dates() {
        let found = find_dates(&lines(&["Valid until 2027-03-15"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].date, day(2027, 3, 15));
    }

    #[test]
    fn day_first_when_first_segment_exceeds_twelve() {
        let found = find_dates(&lines(&["Expiry 25/06/2028", "Issued 06/25/2018"]));
        assert_eq!(found[0].date, day(2028, 6, 25));
        assert_eq!(found[1].date, day(2018, 6, 25));
    }

    #[test]
    fn month_first_by_default() {
        let found = find_dates(&lines(&["03/04/2027"]));
        assert_eq!(found[0].date, day(2027, 3, 4));
    }

    #[test]
    fn two_digit_years_pivot_at_fifty() {
        let found = find_dates(&lines(&["12/01/31", "12/01/97"]));
        assert_eq!(found[0].date, day(2031, 12, 1));
        assert_eq!(found[1].date, day(1997, 12, 1));
    }

    #[test]
    fn finds_month_name_forms() {
        let found = find_dates(&lines(&[
            "Date of expiry: 15 MAR 2029",
            "Issued March 2, 2019",
        ]));
        assert_eq!(found[0].date, day(2029, 3, 15));
        assert_eq!(found[1].date, day(2019, 3, 2));
    }

    #[test]
    fn skips_impossible_dates() {
        let found = find_dates(&lines(&["99/99/2027", "2027-13-40"]));
        assert!(found.is_empty());
    }

    #[test]
    fn keeps_multiple_dates_per_line() {
        let found = find_dates(&lines(&["From 01/02/2026 to 01/02/2027"]));
        assert_eq!(found.len(), 2);
    }
}
