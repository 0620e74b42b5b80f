#![deny(missing_docs)]
//! Typed runtime-environment detection.

use doctrack_env_var::EnvVarErr;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

mod var {
    doctrack_env_var::env_var!(
        #[derive(Clone)]
        pub struct Environment;
    );
}

/// The environment the binary is running in
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev / staging environment
    Develop,
    /// Running on localhost
    Local,
}

/// An error which can occur when constructing an [Environment]
#[derive(Debug, Error)]
pub enum DoctrackEnvErr {
    /// The `ENVIRONMENT` variable could not be read
    #[error("{0}")]
    VarErr(#[from] EnvVarErr),
    /// The value was not a recognized environment name
    #[error("{0}")]
    InvalidValue(#[from] UnknownValue),
}

impl Environment {
    /// Attempts to construct an [Environment] from the `ENVIRONMENT` variable
    #[tracing::instrument(err, level = tracing::Level::TRACE)]
    pub fn new_from_env() -> Result<Self, DoctrackEnvErr> {
        let v = var::Environment::new()?;
        Ok(Self::from_str(&v)?)
    }

    /// Constructs an [Environment], falling back to production when the
    /// variable is absent or unrecognized
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// A value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("unrecognized environment value {0}")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}
