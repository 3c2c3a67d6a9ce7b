use serde::Serialize;
use tickfind_core::{render_row, render_text, ResultRow, SearchView};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{payload}");
    Ok(())
}

pub fn render_rows(rows: &[ResultRow]) {
    if rows.is_empty() {
        println!("(no results)");
        return;
    }
    println!("{:<8} {:<40} EXCHANGE", "SYMBOL", "NAME");
    for row in rows {
        println!("{}", render_row(row));
    }
}

/// One interactive frame: a text block, or one JSON document per view.
pub fn render_view(view: &SearchView, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_text(view));
            Ok(())
        }
        OutputFormat::Json => render_json(view, pretty),
    }
}
