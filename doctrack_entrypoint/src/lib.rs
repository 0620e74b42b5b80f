#![deny(missing_docs)]
//! Standardized initialization for doctrack binaries: dotenv, panic hook, and
//! a tracing configuration that matches where the binary is running.

use doctrack_env::Environment;
use tracing_subscriber::EnvFilter;

/// Describes how to initialize a doctrack binary
#[derive(Debug)]
pub struct DoctrackEntrypoint {
    env: Environment,
}

/// Proof that [DoctrackEntrypoint::init] ran
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl Default for DoctrackEntrypoint {
    fn default() -> Self {
        Self {
            env: Environment::new_or_prod(),
        }
    }
}

impl DoctrackEntrypoint {
    /// Creates an entrypoint for a specific [Environment]
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Consumes self and initializes the binary
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint(())
    }
}
