//! Panel selection for the search box.
//!
//! Before a search (fewer than `min_query_len` characters) a focused input
//! shows the local Recent and Popular suggestion panels. Once the input is
//! long enough only the live All-matches panel is shown, whatever the focus.
//!
//! | Input | Focus | Query | State | Panels |
//! |-------|-------|-------|-------|--------|
//! | empty | no | - | `EmptyUnfocused` | none |
//! | empty | yes | - | `EmptyFocused` | Recent, Popular |
//! | short | yes | - | `TypingShort` | Recent, Popular |
//! | short | no | - | `TypingShort` | none |
//! | long | - | idle / loading / unsettled | `Searching` | All matches |
//! | long | - | success | `ResultsShown` | All matches |
//! | long | - | error | `ErrorShown` | All matches |

use serde::Serialize;

use crate::QueryStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    EmptyUnfocused,
    EmptyFocused,
    TypingShort,
    Searching,
    ResultsShown,
    ErrorShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Recent,
    Popular,
    AllMatches,
}

impl Panel {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Recent => "Recent Tickers",
            Self::Popular => "Popular Tickers",
            Self::AllMatches => "All Tickers",
        }
    }
}

const SUGGESTION_PANELS: &[Panel] = &[Panel::Recent, Panel::Popular];
const LIVE_PANELS: &[Panel] = &[Panel::AllMatches];

/// Raw input, settled input and focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub input_text: String,
    pub debounced_text: String,
    pub is_focused: bool,
}

#[derive(Debug, Clone)]
pub struct ViewController {
    search: SearchState,
    query_status: QueryStatus,
    min_query_len: usize,
    current: ViewState,
}

impl ViewController {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            search: SearchState::default(),
            query_status: QueryStatus::Idle,
            min_query_len,
            current: ViewState::EmptyUnfocused,
        }
    }

    pub const fn state(&self) -> ViewState {
        self.current
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn on_input(&mut self, text: impl Into<String>) -> ViewState {
        self.search.input_text = text.into();
        self.recompute()
    }

    /// The debouncer settled on `text`.
    pub fn on_settled(&mut self, text: impl Into<String>) -> ViewState {
        self.search.debounced_text = text.into();
        self.recompute()
    }

    pub fn on_focus(&mut self) -> ViewState {
        self.search.is_focused = true;
        self.recompute()
    }

    pub fn on_blur(&mut self) -> ViewState {
        self.search.is_focused = false;
        self.recompute()
    }

    pub fn on_query(&mut self, status: QueryStatus) -> ViewState {
        self.query_status = status;
        self.recompute()
    }

    /// Visible panels in display order.
    pub fn panels(&self) -> &'static [Panel] {
        match self.current {
            ViewState::EmptyUnfocused => &[],
            ViewState::EmptyFocused => SUGGESTION_PANELS,
            ViewState::TypingShort if self.search.is_focused => SUGGESTION_PANELS,
            ViewState::TypingShort => &[],
            ViewState::Searching | ViewState::ResultsShown | ViewState::ErrorShown => LIVE_PANELS,
        }
    }

    fn recompute(&mut self) -> ViewState {
        self.current = self.derive();
        self.current
    }

    fn derive(&self) -> ViewState {
        let len = self.search.input_text.chars().count();
        if len == 0 {
            return if self.search.is_focused {
                ViewState::EmptyFocused
            } else {
                ViewState::EmptyUnfocused
            };
        }
        if len < self.min_query_len {
            return ViewState::TypingShort;
        }
        // Results on screen belong to the settled key until the input settles.
        if self.search.debounced_text != self.search.input_text {
            return ViewState::Searching;
        }
        match self.query_status {
            QueryStatus::Idle | QueryStatus::Loading => ViewState::Searching,
            QueryStatus::Success => ViewState::ResultsShown,
            QueryStatus::Error => ViewState::ErrorShown,
        }
    }
}
