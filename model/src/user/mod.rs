use chrono::{DateTime, Utc};
use utoipa::ToSchema;

/// The authenticated caller, decoded from the session token and attached to
/// requests as an Extension.
#[derive(serde::Serialize, serde::Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct UserContext {
    /// The user id (`provider|email` shaped)
    pub user_id: String,
    /// The user's email address
    pub email: String,
}

/// A user row from the `"User"` table.
#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Eq, PartialEq, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct User {
    /// The user id
    pub id: String,
    /// The user's email address
    pub email: String,
    /// The user's display name
    pub name: String,
    /// Storage key of the user's avatar, if one was uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_key: Option<String>,
    /// The time the user row was created
    pub created_at: DateTime<Utc>,
    /// The time the user row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Response body for `GET /account`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct AccountProfile {
    /// The user id
    pub id: String,
    /// The user's email address
    pub email: String,
    /// The user's display name
    pub name: String,
    /// A presigned URL for the avatar, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Whether two-factor authentication is enabled
    pub two_factor_enabled: bool,
}

/// Body for `PATCH /account`.
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    /// The new display name
    pub name: String,
}
