//! A minimal client for the Anthropic messages API.
//!
//! doctrack uses a single short, non-streaming completion to pull structured
//! fields out of recognized document text when the regex heuristics come up
//! empty.

mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{Chat, Client};
pub use config::Config;
pub use error::AnthropicError;
