use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    /// Seconds between full inventory refreshes.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StreamConfig {
    /// Reporting interval passed to `zpool iostat`, in seconds.
    #[serde(default = "default_stream_interval")]
    pub interval_seconds: u64,
    /// How long to wait for the iostat subprocess to exit after a stop
    /// request before force-killing it.
    #[serde(default = "default_stop_grace")]
    pub stop_grace_seconds: u64,
    /// Capacity of the parsed-record channel between the stream task and
    /// the coordinator.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FilterConfig {
    /// Only show this pool (exact name).
    #[serde(default)]
    pub pool: Option<String>,
    /// Regex over dataset names.
    #[serde(default)]
    pub dataset_pattern: Option<String>,
}

fn default_interval() -> u64 {
    5
}

fn default_stream_interval() -> u64 {
    1
}

fn default_stop_grace() -> u64 {
    5
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_stream_interval(),
            stop_grace_seconds: default_stop_grace(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("ZFS_DASHBOARD").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
