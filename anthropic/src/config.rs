use reqwest::header::HeaderMap;

const ANTHROPIC_API_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_base: String,
    pub headers: HeaderMap,
}

impl Config {
    /// Builds a config from an api key.
    pub fn new(api_key: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", api_key.parse().expect("valid api key header"));
        headers.insert(
            "anthropic-version",
            ANTHROPIC_VERSION.parse().expect("valid version header"),
        );
        Self {
            api_base: ANTHROPIC_API_BASE_URL.into(),
            headers,
        }
    }

    /// Reads `ANTHROPIC_API_KEY` from the environment, panicking when absent.
    pub fn dangerously_try_from_env() -> Self {
        let api_key = std::env::var(ANTHROPIC_API_KEY).expect("api key");
        Self::new(&api_key)
    }
}
