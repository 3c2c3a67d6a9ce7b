//! The search box event loop.
//!
//! A [`SearchSession`] owns the debouncer, the query cache, the view
//! controller and the suggestion lists. It is driven one event at a time
//! by [`run_session`]: keystrokes and focus changes from the front end,
//! debounce deadlines, and fetch completions. Nothing else mutates it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::debounce::Debouncer;
use crate::fetcher::{FetchCompletion, Fetcher};
use crate::render::{PanelView, SearchView};
use crate::{
    Lookup, NormalizedRecord, Panel, QueryCache, SearchApi, SearchConfig, SuggestionSet,
    ViewController, ViewState,
};

/// Wake-up used only to keep `select!` armed when no deadline is pending.
const IDLE_WAKE: Duration = Duration::from_secs(3_600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The full input text after a keystroke.
    Input(String),
    Focus,
    Blur,
    /// The user picked row `index` of a visible panel.
    Select { panel: Panel, index: usize },
}

pub struct SearchSession {
    debouncer: Debouncer<String>,
    cache: QueryCache,
    view: ViewController,
    suggestions: SuggestionSet,
    fetcher: Fetcher,
}

impl SearchSession {
    pub fn new(
        api: SearchApi,
        config: &SearchConfig,
    ) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (fetcher, completions) = Fetcher::new(api);
        let session = Self {
            debouncer: Debouncer::new(String::new(), config.debounce),
            cache: QueryCache::new(config.stale_time, config.min_query_len),
            view: ViewController::new(config.min_query_len),
            suggestions: SuggestionSet::default(),
            fetcher,
        };
        (session, completions)
    }

    /// Apply a front-end event. Returns the picked record for `Select`.
    pub fn handle(&mut self, event: SessionEvent, now: Instant) -> Option<NormalizedRecord> {
        match event {
            SessionEvent::Input(text) => {
                self.view.on_input(text.clone());
                if let Some(superseded) = self.debouncer.cancel() {
                    debug!(superseded = %superseded, "pending input superseded");
                }
                self.debouncer.update(text, now);
                None
            }
            SessionEvent::Focus => {
                self.view.on_focus();
                None
            }
            SessionEvent::Blur => {
                self.view.on_blur();
                None
            }
            SessionEvent::Select { panel, index } => self.select(panel, index),
        }
    }

    /// When the pending input settles, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Settle the debounced input if its window elapsed. Returns `true` when
    /// the query key changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debouncer.poll(now) {
            return false;
        }

        let key = self.debouncer.settled().clone();
        self.view.on_settled(key.clone());
        if self.cache.activate(&key, now) == Lookup::Fetch {
            self.fetcher.spawn(key);
        }
        self.view.on_query(self.cache.result().status);
        true
    }

    /// Apply a fetch completion. Returns `true` when it changed the display.
    pub fn complete(&mut self, completion: FetchCompletion, now: Instant) -> bool {
        let FetchCompletion { key, outcome } = completion;
        if !self.cache.resolve(&key, outcome, now) {
            return false;
        }
        self.view.on_query(self.cache.result().status);
        true
    }

    /// No input waiting to settle and no fetch outstanding for the shown key.
    pub fn is_settled(&self) -> bool {
        self.deadline().is_none() && !self.cache.result().is_loading()
    }

    pub fn view(&self) -> SearchView {
        let result = self.cache.result();
        let state = self.view.state();
        let matches = result
            .data
            .as_ref()
            .map(|payload| payload.rows())
            .unwrap_or_default();

        let panels = self
            .view
            .panels()
            .iter()
            .map(|panel| match panel {
                Panel::Recent => PanelView::new(Panel::Recent, self.suggestions.recent()),
                Panel::Popular => PanelView::new(Panel::Popular, self.suggestions.popular()),
                Panel::AllMatches => PanelView::new(Panel::AllMatches, &matches),
            })
            .collect();

        SearchView {
            state,
            search: self.view.search_state().clone(),
            status: result.status,
            is_fetching: result.is_loading(),
            error: if state == ViewState::ErrorShown {
                result.error
            } else {
                None
            },
            panels,
        }
    }

    fn records(&self, panel: Panel) -> Vec<NormalizedRecord> {
        if !self.view.panels().contains(&panel) {
            return Vec::new();
        }
        match panel {
            Panel::Recent => self.suggestions.recent().cloned().collect(),
            Panel::Popular => self.suggestions.popular().to_vec(),
            Panel::AllMatches => self
                .cache
                .result()
                .data
                .map(|payload| payload.rows())
                .unwrap_or_default(),
        }
    }

    fn select(&mut self, panel: Panel, index: usize) -> Option<NormalizedRecord> {
        let record = self.records(panel).into_iter().nth(index)?;
        info!(symbol = %record.symbol, panel = panel.title(), "ticker selected");
        self.suggestions.remember(record.clone());
        Some(record)
    }
}

/// Drive `session` until `events` closes and the session has settled.
///
/// `on_view` is called after every event that may have changed the display.
pub async fn run_session<F>(
    mut session: SearchSession,
    mut events: mpsc::Receiver<SessionEvent>,
    mut completions: mpsc::UnboundedReceiver<FetchCompletion>,
    mut on_view: F,
) -> SearchSession
where
    F: FnMut(&SearchView),
{
    let mut events_open = true;

    loop {
        if !events_open && session.is_settled() {
            break;
        }

        let deadline = session.deadline();
        let wake_at = deadline.unwrap_or_else(|| Instant::now() + IDLE_WAKE);

        tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(event) => {
                    session.handle(event, Instant::now());
                }
                None => {
                    debug!("event stream closed; waiting for session to settle");
                    events_open = false;
                    continue;
                }
            },
            Some(completion) = completions.recv() => {
                if !session.complete(completion, Instant::now()) {
                    continue;
                }
            }
            _ = sleep_until(wake_at), if deadline.is_some() => {
                if !session.tick(Instant::now()) {
                    continue;
                }
            }
        }

        on_view(&session.view());
    }

    session
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{NoopHttpClient, QueryStatus};

    fn session() -> (SearchSession, mpsc::UnboundedReceiver<FetchCompletion>) {
        let config = SearchConfig::default();
        let api = SearchApi::new(Arc::new(NoopHttpClient), &config);
        SearchSession::new(api, &config)
    }

    #[tokio::test]
    async fn focus_without_input_shows_suggestions() {
        let (mut session, _completions) = session();
        session.handle(SessionEvent::Focus, Instant::now());

        let view = session.view();
        assert_eq!(view.state, ViewState::EmptyFocused);
        assert_eq!(view.rows(Panel::Recent)[0].symbol, "AAPL");
        assert!(!view.rows(Panel::Popular).is_empty());
        assert!(view.panel(Panel::AllMatches).is_none());
    }

    #[tokio::test]
    async fn single_character_never_fetches() {
        let (mut session, mut completions) = session();
        let start = Instant::now();

        session.handle(SessionEvent::Input(String::from("A")), start);
        assert!(session.tick(start + Duration::from_millis(300)));

        assert_eq!(session.view().status, QueryStatus::Idle);
        assert!(completions.try_recv().is_err());
    }

    #[tokio::test]
    async fn new_keystroke_cancels_the_pending_input() {
        let (mut session, mut completions) = session();
        let start = Instant::now();

        session.handle(SessionEvent::Input(String::from("AA")), start);
        session.handle(
            SessionEvent::Input(String::from("AAP")),
            start + Duration::from_millis(200),
        );

        assert_eq!(session.deadline(), Some(start + Duration::from_millis(500)));
        assert!(!session.tick(start + Duration::from_millis(300)));
        assert!(completions.try_recv().is_err());

        assert!(session.tick(start + Duration::from_millis(500)));
        assert_eq!(session.view().search.debounced_text, "AAP");
    }

    #[tokio::test]
    async fn retyping_the_settled_text_cancels_without_rescheduling() {
        let (mut session, _completions) = session();
        let start = Instant::now();

        session.handle(SessionEvent::Input(String::from("AA")), start);
        assert!(session.tick(start + Duration::from_millis(300)));

        session.handle(
            SessionEvent::Input(String::from("AAP")),
            start + Duration::from_millis(400),
        );
        session.handle(
            SessionEvent::Input(String::from("AA")),
            start + Duration::from_millis(450),
        );

        assert_eq!(session.deadline(), None);
        assert!(!session.tick(start + Duration::from_millis(800)));
        assert_eq!(session.view().search.debounced_text, "AA");
    }

    #[tokio::test]
    async fn selecting_a_suggestion_moves_it_to_recent_front() {
        let (mut session, _completions) = session();
        session.handle(SessionEvent::Focus, Instant::now());

        let picked = session.handle(
            SessionEvent::Select {
                panel: Panel::Popular,
                index: 1,
            },
            Instant::now(),
        );

        assert_eq!(picked.map(|record| record.symbol), Some(String::from("MSFT")));
        assert_eq!(session.view().rows(Panel::Recent)[0].symbol, "MSFT");
    }

    #[tokio::test]
    async fn selecting_from_hidden_panel_picks_nothing() {
        let (mut session, _completions) = session();
        let picked = session.handle(
            SessionEvent::Select {
                panel: Panel::Recent,
                index: 0,
            },
            Instant::now(),
        );
        assert_eq!(picked, None);
    }
}
