//! Session-token validation for doctrack services.
//!
//! The hosted identity provider issues HS256 session JWTs; this crate
//! validates them and exposes an axum middleware that attaches the
//! authenticated [model::user::UserContext] to the request.

pub mod error;
pub mod middleware;

use doctrack_env_var::{EnvVarErr, env_var};
use error::DoctrackAuthError;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

env_var! {
    #[derive(Clone)]
    struct JwtSecret;
}

env_var! {
    #[derive(Clone)]
    struct JwtAudience;
}

env_var! {
    #[derive(Clone)]
    struct JwtIssuer;
}

/// Everything needed to validate a session token.
#[derive(Clone)]
pub struct JwtValidationArgs {
    secret: JwtSecret,
    audience: JwtAudience,
    issuer: JwtIssuer,
}

impl JwtValidationArgs {
    /// Reads the secret, audience and issuer from the environment.
    pub fn new_from_env() -> Result<Self, EnvVarErr> {
        Ok(Self {
            secret: JwtSecret::new()?,
            audience: JwtAudience::new()?,
            issuer: JwtIssuer::new()?,
        })
    }

    /// Builds validation args from literals, for tests.
    pub fn new_from_parts(secret: &str, audience: &str, issuer: &str) -> Self {
        Self {
            secret: JwtSecret::new_from(secret),
            audience: JwtAudience::new_from(audience),
            issuer: JwtIssuer::new_from(issuer),
        }
    }
}

/// The claims carried by a session token.
#[derive(serde::Serialize, serde::Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct AccessToken {
    /// The audience of the token
    pub aud: String,
    /// The expiration time of the token
    pub exp: usize,
    /// The issuer of the token
    pub iss: String,
    /// The subject: the doctrack user id
    pub sub: String,
    /// The email of the user
    pub email: String,
}

/// Validates a session token and returns its claims.
pub fn validate_access_token(
    token: &str,
    args: &JwtValidationArgs,
) -> Result<AccessToken, DoctrackAuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[args.audience.as_ref()]);
    validation.set_issuer(&[args.issuer.as_ref()]);

    let data = decode::<AccessToken>(
        token,
        &DecodingKey::from_secret(args.secret.as_ref().as_bytes()),
        &validation,
    )
    .map_err(DoctrackAuthError::InvalidToken)?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn args() -> JwtValidationArgs {
        JwtValidationArgs::new_from_parts("test-secret", "doctrack", "https://id.example.com")
    }

    fn token(claims: &AccessToken, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims() -> AccessToken {
        AccessToken {
            aud: "doctrack".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            iss: "https://id.example.com".to_string(),
            sub: "doctrack|user@user.com".to_string(),
            email: "user@user.com".to_string(),
        }
    }

    #[test]
    fn accepts_a_valid_token() {
        let decoded = validate_access_token(&token(&claims(), "test-secret"), &args()).unwrap();
        assert_eq!(decoded.sub, "doctrack|user@user.com");
        assert_eq!(decoded.email, "user@user.com");
    }

    #[test]
    fn rejects_a_bad_signature() {
        let result = validate_access_token(&token(&claims(), "other-secret"), &args());
        assert!(result.is_err());
    }

    #[test]
    fn rejects_a_wrong_audience() {
        let mut bad = claims();
        bad.aud = "someone-else".to_string();
        let result = validate_access_token(&token(&bad, "test-secret"), &args());
        assert!(result.is_err());
    }

    #[test]
    fn rejects_an_expired_token() {
        let mut bad = claims();
        bad.exp = (chrono::Utc::now().timestamp() - 3600) as usize;
        let result = validate_access_token(&token(&bad, "test-secret"), &args());
        assert!(result.is_err());
    }
}
