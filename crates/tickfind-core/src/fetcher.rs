use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{SearchApi, SearchError, SearchPayload};

/// Result of one remote lookup, delivered back to the session loop.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompletion {
    pub key: String,
    pub outcome: Result<SearchPayload, SearchError>,
}

/// Runs lookups as background tasks and reports their completions on a channel.
///
/// Tasks are never aborted; a superseded lookup still completes and its
/// result is still sent.
#[derive(Clone)]
pub struct Fetcher {
    api: SearchApi,
    completions: mpsc::UnboundedSender<FetchCompletion>,
}

impl Fetcher {
    pub fn new(api: SearchApi) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        (Self { api, completions }, receiver)
    }

    pub fn spawn(&self, key: String) -> JoinHandle<()> {
        let api = self.api.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = api.search(&key).await;
            match &outcome {
                Ok(payload) => debug!(key = %key, records = payload.records().len(), "search completed"),
                Err(error) => warn!(key = %key, code = error.code(), %error, "search failed"),
            }
            // The receiver is gone once the session has shut down.
            let _ = completions.send(FetchCompletion { key, outcome });
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{NoopHttpClient, SearchConfig};

    #[tokio::test]
    async fn completion_is_delivered_with_its_key() {
        let api = SearchApi::new(Arc::new(NoopHttpClient), &SearchConfig::default());
        let (fetcher, mut completions) = Fetcher::new(api);

        fetcher.spawn(String::from("AA")).await.expect("task joins");

        let completion = completions.recv().await.expect("completion sent");
        assert_eq!(completion.key, "AA");
        assert_eq!(completion.outcome, Ok(SearchPayload::Records(Vec::new())));
    }
}
