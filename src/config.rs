use std::time::Duration;

/// Path of the trade stream below the backend base URL.
pub const TRADES_PATH: &str = "/api/finnhub/trades";

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// How long to wait for the first message before giving up.
pub const DEFAULT_FIRST_MESSAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the trade feed lives and how patient to be with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub base_url: String,
    pub first_message_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("TRADE_FEED_BASE_URL").unwrap_or(DEFAULT_BASE_URL).to_string(),
            first_message_timeout: DEFAULT_FIRST_MESSAGE_TIMEOUT,
        }
    }
}

impl FeedConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_first_message_timeout(mut self, timeout: Duration) -> Self {
        self.first_message_timeout = timeout;
        self
    }

    /// Full SSE endpoint URL.
    pub fn feed_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), TRADES_PATH)
    }

    /// Timeout in the unit browser timers take, saturating at `u32::MAX`.
    pub fn timeout_millis(&self) -> u32 {
        u32::try_from(self.first_message_timeout.as_millis()).unwrap_or(u32::MAX)
    }
}
