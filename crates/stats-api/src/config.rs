use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com/api";
pub const MLB_SPORT_ID: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsApiConfig {
    /// Root of the versioned API, without the `/v1` segment.
    pub base_url: String,
    pub sport_id: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for StatsApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sport_id: MLB_SPORT_ID,
            timeout_secs: 30,
            user_agent: format!("diamond-digest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl StatsApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
