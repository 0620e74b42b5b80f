pub use doctrack_env::Environment;
use doctrack_env_var::env_var;

/// The configuration parameters for the service.
///
/// Everything is pulled from environment variables; `.env` is loaded by the
/// entrypoint for local runs.
pub struct Config {
    pub vars: EnvVars,

    /// The port to listen for HTTP requests on.
    pub port: usize,

    /// The environment we are in
    pub environment: Environment,

    /// The number of seconds a presigned url is valid for
    pub presigned_url_expiry_seconds: u64,

    /// The model used for scan field extraction. The fallback is disabled
    /// entirely when no api key is configured.
    pub extraction_model: String,
}

env_var! {
    struct EnvVars {
        pub DatabaseUrl,
        pub DocumentsBucket,
        pub AvatarsBucket,
        pub ReminderFromEmail,
        pub FrontendBaseUrl,
    }
}

env_var! { struct Port; }
env_var! { struct PresignedUrlExpirySeconds; }
env_var! { pub struct AnthropicApiKey; }
env_var! { struct ExtractionModel; }

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::new_or_prod();

        let port = Port::new()
            .ok()
            .and_then(|v| v.as_ref().parse::<usize>().ok())
            .unwrap_or(8080);

        let presigned_url_expiry_seconds = PresignedUrlExpirySeconds::new()
            .ok()
            .and_then(|v| v.as_ref().parse::<u64>().ok())
            .unwrap_or(DEFAULT_PRESIGNED_URL_EXPIRY_SECONDS);

        let extraction_model = ExtractionModel::new()
            .map(|v| v.as_ref().to_string())
            .unwrap_or_else(|_| DEFAULT_EXTRACTION_MODEL.to_string());

        let vars = EnvVars::new()?;

        Ok(Config {
            vars,
            port,
            environment,
            presigned_url_expiry_seconds,
            extraction_model,
        })
    }
}

pub const DEFAULT_PRESIGNED_URL_EXPIRY_SECONDS: u64 = 900; // 15 minutes
pub const DEFAULT_EXTRACTION_MODEL: &str = "claude-3-5-haiku-latest";

/// Lines below this confidence are dropped before field extraction.
pub const MIN_OCR_CONFIDENCE: f32 = 50.0;

/// How many upcoming expirations the dashboard shows.
pub const DASHBOARD_UPCOMING_LIMIT: i64 = 5;
