use std::str::FromStr;
use std::time::Duration;

/// A configuration variable was present but unusable.
#[derive(Debug, thiserror::Error)]
#[error("{key} has invalid value '{value}': {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Agent configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the orchestrator, without trailing slash.
    pub orchestrator_url: String,
    /// Delay between polls when no task is available or the orchestrator
    /// is unreachable.
    pub poll_interval: Duration,
    /// Number of independent poll loops run concurrently.
    pub computing_power: usize,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl AgentConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `ORCHESTRATOR_URL`     | `http://localhost:8080`  |
    /// | `POLL_INTERVAL_MS`     | `2000`                   |
    /// | `COMPUTING_POWER`      | `1`                      |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let orchestrator_url = lookup("ORCHESTRATOR_URL")
            .unwrap_or_else(|| "http://localhost:8080".into())
            .trim_end_matches('/')
            .to_string();

        let poll_interval_ms: u64 = parse_or(&lookup, "POLL_INTERVAL_MS", 2000)?;
        let computing_power: usize = parse_or(&lookup, "COMPUTING_POWER", 1)?;
        if computing_power == 0 {
            return Err(ConfigError {
                key: "COMPUTING_POWER",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            orchestrator_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            computing_power,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
