//! Wire types for the two-factor settings endpoints.

use chrono::{DateTime, Utc};
use utoipa::ToSchema;

/// A row from the `"TwoFactor"` table.
#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Eq, PartialEq, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct TwoFactor {
    /// The owning user id
    pub user_id: String,
    /// The base32 TOTP secret
    pub secret: String,
    /// Whether the user has completed verification
    pub enabled: bool,
    /// When the first valid code was submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    /// The time the row was created
    pub created_at: DateTime<Utc>,
}

/// Response body for `POST /two_factor/generate`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct GenerateTwoFactorResponse {
    /// The base32 secret to enter into an authenticator app
    pub secret: String,
    /// The otpauth:// URL encoding the secret for QR display
    pub otpauth_url: String,
}

/// Body for `POST /two_factor/verify` and `POST /two_factor/disable`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct TwoFactorCodeRequest {
    /// The 6-digit TOTP code from the authenticator app
    pub code: String,
}

/// Response body for `POST /two_factor/verify`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct TwoFactorStatusResponse {
    /// Whether two-factor authentication is now enabled
    pub enabled: bool,
}
