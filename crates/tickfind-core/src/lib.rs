//! # tickfind core
//!
//! Search-box state for ticker-symbol lookup: debounced input, a remote
//! search API with a short-lived per-key cache, normalization of untrusted
//! result records, and explicit selection of the visible result panels.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Remote search API client and payload decoding |
//! | [`cache`] | Per-key query cache with stale-while-revalidate display |
//! | [`config`] | Session configuration and defaults |
//! | [`debounce`] | Quiet-window debouncer |
//! | [`error`] | Core error types |
//! | [`fetcher`] | Background lookups reporting on a channel |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`record`] | Raw and normalized result records |
//! | [`render`] | Display rows and text rendering |
//! | [`session`] | Event loop tying the pieces together |
//! | [`suggestions`] | Local Recent/Popular suggestion lists |
//! | [`view`] | Panel-selection state machine |
//!
//! ## Architecture
//!
//! ```text
//! keystroke ──▶ ViewController (input, focus)
//!     │
//!     ▼
//! Debouncer ──settled key──▶ QueryCache ──miss──▶ Fetcher ──▶ SearchApi ──▶ HttpClient
//!                                ▲                   │
//!                                └──FetchCompletion──┘
//!     │
//!     ▼
//! normalize + filter ──▶ panels ──▶ SearchView
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickfind_core::{run_session, ReqwestHttpClient, SearchApi, SearchConfig, SearchSession, SessionEvent};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SearchConfig::default();
//!     let api = SearchApi::new(Arc::new(ReqwestHttpClient::new()), &config);
//!     let (session, completions) = SearchSession::new(api, &config);
//!
//!     let (events, rx) = tokio::sync::mpsc::channel(16);
//!     events.send(SessionEvent::Focus).await.ok();
//!     events.send(SessionEvent::Input("AAPL".into())).await.ok();
//!     drop(events);
//!
//!     run_session(session, rx, completions, |view| {
//!         print!("{}", tickfind_core::render_text(view));
//!     })
//!     .await;
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod record;
pub mod render;
pub mod session;
pub mod suggestions;
pub mod view;

pub use api::{SearchApi, SearchPayload};
pub use cache::{Lookup, QueryCache, QueryResult, QueryStatus};
pub use config::SearchConfig;
pub use debounce::Debouncer;
pub use error::{ConfigError, SearchError};
pub use fetcher::{FetchCompletion, Fetcher};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use record::{
    displayable_records, is_displayable, normalize, NormalizedRecord, RawRecord, DEFAULT_EXCHANGE,
};
pub use render::{render_row, render_text, PanelView, ResultRow, SearchView};
pub use session::{run_session, SearchSession, SessionEvent};
pub use suggestions::SuggestionSet;
pub use view::{Panel, SearchState, ViewController, ViewState};
