//! Runtime configuration
//!
//! One endpoint setting decides everything: when `NEXORA_API_URL` is set the
//! gateway talks to the REST API, when it is absent the gateway runs entirely
//! out of local key-value files (demo mode). The decision is made once at
//! construction and never changes for the process lifetime.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Environment variable holding the API base URL (e.g. `http://localhost:4000/api`)
pub const API_URL_ENV: &str = "NEXORA_API_URL";
/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "NEXORA_DATA_DIR";
/// Environment variable overriding the polling period in seconds
pub const POLL_SECS_ENV: &str = "NEXORA_POLL_SECS";

/// Reference polling period for remote-mode change notifications
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(15);

/// Gateway configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// REST API base URL; None selects demo mode
    pub api_url: Option<String>,
    /// Directory for the demo-mode store and the session snapshot
    pub data_dir: PathBuf,
    /// Change-notifier polling period (remote mode only)
    pub poll_period: Duration,
}

impl GatewayConfig {
    /// Resolve configuration from environment variables
    pub fn from_env() -> Self {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if api_url.is_none() {
            warn!("{} not set: running in offline/demo mode with local storage", API_URL_ENV);
        }

        let data_dir = std::env::var(DATA_DIR_ENV)
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let poll_period = std::env::var(POLL_SECS_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_PERIOD);

        Self {
            api_url,
            data_dir,
            poll_period,
        }
    }

    /// Configuration for a given endpoint and data directory (tests, embeds)
    pub fn new(api_url: Option<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url,
            data_dir: data_dir.into(),
            poll_period: DEFAULT_POLL_PERIOD,
        }
    }

    /// True when no remote endpoint is configured
    pub fn demo_mode(&self) -> bool {
        self.api_url.is_none()
    }
}

/// Default platform data directory (~/.local/share/nexora on Linux)
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nexora")
}
