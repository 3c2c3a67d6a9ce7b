use tickfind_core::{Panel, PanelView, SuggestionSet};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

pub fn run(format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let suggestions = SuggestionSet::default();
    let panels = vec![
        PanelView::new(Panel::Recent, suggestions.recent()),
        PanelView::new(Panel::Popular, suggestions.popular()),
    ];

    match format {
        OutputFormat::Table => {
            for panel in &panels {
                println!("{}", panel.title);
                output::render_rows(&panel.rows);
                println!();
            }
            Ok(())
        }
        OutputFormat::Json => output::render_json(&panels, pretty),
    }
}
