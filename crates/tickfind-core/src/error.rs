use thiserror::Error;

/// Failure of a single remote lookup.
///
/// Both variants surface to the user as one message; neither is retried.
/// A body that parses but is not array-shaped is not an error, see
/// [`SearchPayload::Unrecognized`](crate::SearchPayload::Unrecognized).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The request never completed or the API answered with a non-2xx status.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SearchError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "search.network",
            Self::Parse(_) => "search.parse",
        }
    }
}

/// Rejected [`SearchConfig`](crate::SearchConfig) values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("endpoint must not be empty")]
    EmptyEndpoint,
    #[error("endpoint must start with http:// or https://: '{value}'")]
    InvalidEndpointScheme { value: String },
    #[error("min_query_len must be at least 1")]
    ZeroMinQueryLen,
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
}
