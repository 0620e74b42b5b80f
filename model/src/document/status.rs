use chrono::{Days, NaiveDate};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// How many days before expiration a document counts as expiring soon.
pub const EXPIRING_SOON_WINDOW_DAYS: u64 = 30;

/// The derived status of a document. Never stored, always computed from the
/// expiration date and the current date.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentStatus {
    /// Expiration is more than the reminder window away
    Valid,
    /// Expiration falls within the reminder window (today included)
    ExpiringSoon,
    /// The expiration date has passed
    Expired,
    /// The document has no expiration date
    NoExpiry,
}

impl DocumentStatus {
    /// Classifies a document by its expiration date as of `today`.
    ///
    /// A document expiring today is expiring soon, not expired.
    pub fn classify(expires_at: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(expires_at) = expires_at else {
            return DocumentStatus::NoExpiry;
        };

        if expires_at < today {
            return DocumentStatus::Expired;
        }

        let window_end = today
            .checked_add_days(Days::new(EXPIRING_SOON_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX);
        if expires_at <= window_end {
            DocumentStatus::ExpiringSoon
        } else {
            DocumentStatus::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_date_means_no_expiry() {
        assert_eq!(
            DocumentStatus::classify(None, day(2026, 8, 7)),
            DocumentStatus::NoExpiry
        );
    }

    #[test]
    fn past_date_is_expired() {
        assert_eq!(
            DocumentStatus::classify(Some(day(2026, 8, 6)), day(2026, 8, 7)),
            DocumentStatus::Expired
        );
    }

    #[test]
    fn expiring_today_is_expiring_soon() {
        assert_eq!(
            DocumentStatus::classify(Some(day(2026, 8, 7)), day(2026, 8, 7)),
            DocumentStatus::ExpiringSoon
        );
    }

    #[test]
    fn window_boundary_is_inclusive() {
        // exactly 30 days out
        assert_eq!(
            DocumentStatus::classify(Some(day(2026, 9, 6)), day(2026, 8, 7)),
            DocumentStatus::ExpiringSoon
        );
        // 31 days out
        assert_eq!(
            DocumentStatus::classify(Some(day(2026, 9, 7)), day(2026, 8, 7)),
            DocumentStatus::Valid
        );
    }

    #[test]
    fn far_future_is_valid() {
        assert_eq!(
            DocumentStatus::classify(Some(day(2030, 1, 1)), day(2026, 8, 7)),
            DocumentStatus::Valid
        );
    }
}
