use doctrack_env_var::env_var;

env_var! {
    struct EnvVars {
        pub DatabaseUrl,
        pub ReminderFromEmail,
    }
}

env_var! { struct PollIntervalSeconds; }

pub struct Config {
    pub vars: EnvVars,
    /// Seconds between due-reminder sweeps
    pub poll_interval_seconds: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let poll_interval_seconds = PollIntervalSeconds::new()
            .ok()
            .and_then(|v| v.as_ref().parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS);

        Ok(Config {
            vars: EnvVars::new()?,
            poll_interval_seconds,
        })
    }
}

pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 3600; // hourly
