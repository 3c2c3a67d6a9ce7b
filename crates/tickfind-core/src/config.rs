//! Runtime knobs for a search session.

use std::time::Duration;

use crate::ConfigError;

/// Default remote lookup endpoint. `{query}` is replaced by the encoded search text.
pub const DEFAULT_ENDPOINT: &str =
    "https://api.marketterminal.com/v1/ticker/findAllTickers?query={query}";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_STALE_TIME: Duration = Duration::from_millis(10_000);
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Search session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub endpoint: String,
    /// Quiet window before the input text settles into a query key.
    pub debounce: Duration,
    /// How long a successful result is served without refetching.
    pub stale_time: Duration,
    /// Shortest key (in characters) that is sent to the remote API.
    pub min_query_len: usize,
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            debounce: DEFAULT_DEBOUNCE,
            stale_time: DEFAULT_STALE_TIME,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SearchConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpointScheme {
                value: endpoint.to_owned(),
            });
        }
        if self.min_query_len == 0 {
            return Err(ConfigError::ZeroMinQueryLen);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
