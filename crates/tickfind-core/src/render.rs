//! Display rows and a plain-text rendering of a [`SearchView`].

use std::fmt::Write as _;

use serde::Serialize;

use crate::{NormalizedRecord, Panel, QueryStatus, SearchState, ViewState};

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
}

impl From<&NormalizedRecord> for ResultRow {
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            name: record.name.clone().unwrap_or_default(),
            exchange: record.exchange.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub panel: Panel,
    pub title: &'static str,
    pub rows: Vec<ResultRow>,
}

impl PanelView {
    pub fn new<'a, I>(panel: Panel, records: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedRecord>,
    {
        Self {
            panel,
            title: panel.title(),
            rows: records.into_iter().map(ResultRow::from).collect(),
        }
    }
}

/// Everything a front end needs to draw the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub state: ViewState,
    pub search: SearchState,
    pub status: QueryStatus,
    /// Spinner flag: a fetch for the displayed key is outstanding.
    pub is_fetching: bool,
    pub error: Option<String>,
    pub panels: Vec<PanelView>,
}

impl SearchView {
    pub fn panel(&self, panel: Panel) -> Option<&PanelView> {
        self.panels.iter().find(|view| view.panel == panel)
    }

    pub fn rows(&self, panel: Panel) -> &[ResultRow] {
        self.panel(panel)
            .map(|view| view.rows.as_slice())
            .unwrap_or_default()
    }
}

pub fn render_row(row: &ResultRow) -> String {
    format!("{:<8} {:<40} {}", row.symbol, row.name, row.exchange)
}

pub fn render_text(view: &SearchView) -> String {
    let mut out = String::new();
    let spinner = if view.is_fetching { " …" } else { "" };
    let _ = writeln!(out, "> {}{}", view.search.input_text, spinner);

    if let Some(error) = &view.error {
        let _ = writeln!(out, "An error has occurred: {error}");
    }

    for panel in &view.panels {
        let _ = writeln!(out, "{}", panel.title);
        if panel.rows.is_empty() {
            let _ = writeln!(out, "  (no results)");
        }
        for (index, row) in panel.rows.iter().enumerate() {
            let _ = writeln!(out, "  {:>2}. {}", index + 1, render_row(row));
        }
    }

    out
}
