//! Remote ticker-search API client.
//!
//! Builds the request URL from an endpoint template, runs it through an
//! [`HttpClient`], classifies failures into [`SearchError`] and decodes the
//! body into a [`SearchPayload`].

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::http_client::{HttpClient, HttpRequest};
use crate::record::{displayable_records, NormalizedRecord, RawRecord};
use crate::{SearchConfig, SearchError};

const QUERY_PLACEHOLDER: &str = "{query}";

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPayload {
    /// The body was a JSON array.
    Records(Vec<RawRecord>),
    /// Valid JSON of some other shape. Rendered as an empty result set.
    Unrecognized(Value),
}

impl SearchPayload {
    /// Decode a response body. Non-array JSON is absorbed, invalid JSON is an error.
    pub fn decode(body: &str) -> Result<Self, SearchError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| SearchError::Parse(format!("failed to parse search response: {e}")))?;

        match value {
            Value::Array(items) => Ok(Self::Records(
                items.into_iter().map(RawRecord::from_value).collect(),
            )),
            other => {
                debug!(shape = json_kind(&other), "search response is not an array; treating as empty");
                Ok(Self::Unrecognized(other))
            }
        }
    }

    pub fn records(&self) -> &[RawRecord] {
        match self {
            Self::Records(records) => records,
            Self::Unrecognized(_) => &[],
        }
    }

    /// Normalized, displayable records in API order.
    pub fn rows(&self) -> Vec<NormalizedRecord> {
        displayable_records(self.records())
    }
}

/// Search API bound to one endpoint template.
#[derive(Clone)]
pub struct SearchApi {
    http_client: Arc<dyn HttpClient>,
    endpoint: String,
    timeout_ms: u64,
}

impl SearchApi {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &SearchConfig) -> Self {
        Self {
            http_client,
            endpoint: config.endpoint.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// URL for `query`: substitutes `{query}` when present, otherwise appends
    /// the encoded text as the last path segment.
    pub fn url_for(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        if self.endpoint.contains(QUERY_PLACEHOLDER) {
            self.endpoint.replace(QUERY_PLACEHOLDER, &encoded)
        } else {
            format!("{}/{}", self.endpoint.trim_end_matches('/'), encoded)
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchPayload, SearchError> {
        let request = HttpRequest::get(self.url_for(query))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SearchError::Network(format!("search transport error: {}", e.message())))?;

        if !response.is_success() {
            return Err(SearchError::Network(format!(
                "search api returned status {}",
                response.status
            )));
        }

        SearchPayload::decode(&response.body)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
