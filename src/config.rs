//! Configuration types for cs-sharecode

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, path::PathBuf, time::Duration};

/// Name of the helper executable looked up on PATH
pub const HELPER_BINARY_NAME: &str = if cfg!(windows) {
    "boiler-writter.exe"
} else {
    "boiler-writter"
};

/// Main configuration for [`ShareCodeResolver`](crate::ShareCodeResolver)
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Helper process settings
    #[serde(default)]
    pub helper: HelperConfig,

    /// Demo link probe settings
    #[serde(default)]
    pub link_check: LinkCheckConfig,

    /// Caller-side retry policy (not applied by the resolver itself)
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
            key: None,
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })
    }
}

/// Helper process (`boiler-writter`) settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Path to the helper executable (auto-detected if None)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Whether to search PATH for the helper if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Directory for transient payload files (default: OS temp dir)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Kill the helper if it has not exited within this time (default: 30 seconds)
    #[serde(
        default = "default_helper_timeout",
        with = "optional_duration_serde"
    )]
    pub timeout: Option<Duration>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            path: None,
            search_path: true,
            temp_dir: None,
            timeout: default_helper_timeout(),
        }
    }
}

/// Demo link probe settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkCheckConfig {
    /// Timeout for the HEAD probe (default: 10 seconds)
    #[serde(default = "default_link_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent sent with the probe
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for LinkCheckConfig {
    fn default() -> Self {
        Self {
            timeout: default_link_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Retry configuration for transient failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 0, no retries)
    #[serde(default)]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 2 seconds)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 30 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_helper_timeout() -> Option<Duration> {
    Some(Duration::from_secs(30))
}

fn default_link_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!("cs-sharecode/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(30)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Durations as whole seconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        value.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Optional durations as whole seconds, `null` meaning none
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
