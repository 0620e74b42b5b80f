use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The fixed set of document kinds a user can track.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    EnumIter,
    Display,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentKind {
    /// A passport
    Passport,
    /// A driver's license
    DriversLicense,
    /// A national identity card
    NationalId,
    /// A rental or lease agreement
    Lease,
    /// An insurance policy
    Insurance,
    /// A recurring subscription
    Subscription,
    /// A travel or residence visa
    Visa,
    /// A professional or product certificate
    Certificate,
    /// Anything else
    #[default]
    Other,
}

impl DocumentKind {
    /// Whether identity-document fields (number, issue date, authority) apply.
    pub fn is_identity(&self) -> bool {
        matches!(
            self,
            DocumentKind::Passport | DocumentKind::DriversLicense | DocumentKind::NationalId
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn round_trips_every_kind() {
        for kind in DocumentKind::iter() {
            assert_eq!(DocumentKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn snake_case_names() {
        assert_eq!(DocumentKind::DriversLicense.to_string(), "drivers_license");
        assert_eq!(
            DocumentKind::from_str("national_id").unwrap(),
            DocumentKind::NationalId
        );
    }

    #[test]
    fn identity_kinds() {
        assert!(DocumentKind::Passport.is_identity());
        assert!(DocumentKind::NationalId.is_identity());
        assert!(!DocumentKind::Lease.is_identity());
        assert!(!DocumentKind::Other.is_identity());
    }
}
