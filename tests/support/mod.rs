//! Scripted transport shared by the behaviour tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tickfind_core::{
    FetchCompletion, HttpClient, HttpError, HttpRequest, HttpResponse, SearchApi, SearchConfig,
    SearchSession,
};
use tokio::sync::mpsc;

pub const ENDPOINT: &str = "https://api.tickfind.test/search";

/// Answers each query from a script; unknown queries get `[]`.
#[derive(Default)]
pub struct ScriptedClient {
    responses: HashMap<String, Result<HttpResponse, HttpError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, body: &str) -> Self {
        self.responses
            .insert(query.to_owned(), Ok(HttpResponse::ok_json(body)));
        self
    }

    pub fn respond_status(mut self, query: &str, status: u16) -> Self {
        self.responses
            .insert(query.to_owned(), Ok(HttpResponse::with_status(status, "")));
        self
    }

    pub fn fail(mut self, query: &str, message: &str) -> Self {
        self.responses
            .insert(query.to_owned(), Err(HttpError::new(message)));
        self
    }

    pub fn delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_owned(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl HttpClient for ScriptedClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let query = request
            .url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_owned();
        self.calls.lock().expect("calls lock").push(query.clone());

        let response = self
            .responses
            .get(&query)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::ok_json("[]")));
        let delay = self.delays.get(&query).copied().unwrap_or_default();

        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            response
        })
    }
}

pub fn config() -> SearchConfig {
    SearchConfig::default().with_endpoint(ENDPOINT)
}

pub fn session_with(
    client: Arc<ScriptedClient>,
) -> (SearchSession, mpsc::UnboundedReceiver<FetchCompletion>) {
    let config = config();
    let api = SearchApi::new(client, &config);
    SearchSession::new(api, &config)
}
