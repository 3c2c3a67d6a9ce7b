use tickfind_core::{run_session, Panel, SearchApi, SearchConfig, SearchSession, SessionEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cli::{InteractiveArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Debug, PartialEq, Eq)]
enum LineCommand {
    Event(SessionEvent),
    Quit,
}

pub async fn run(
    args: &InteractiveArgs,
    api: SearchApi,
    config: &SearchConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let (session, completions) = SearchSession::new(api, config);
    let (events, receiver) = mpsc::channel(64);
    let reader = tokio::spawn(read_events(events, !args.unfocused));

    let mut render_error = None;
    run_session(session, receiver, completions, |view| {
        if render_error.is_some() {
            return;
        }
        if let Err(error) = output::render_view(view, format, pretty) {
            render_error = Some(error);
        }
    })
    .await;

    reader
        .await
        .map_err(|e| CliError::Command(format!("input reader failed: {e}")))??;

    match render_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

async fn read_events(events: mpsc::Sender<SessionEvent>, focused: bool) -> Result<(), CliError> {
    if focused && events.send(SessionEvent::Focus).await.is_err() {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(LineCommand::Event(event)) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Ok(LineCommand::Quit) => break,
            Err(message) => warn!("{message}"),
        }
    }

    debug!("input closed");
    Ok(())
}

/// A plain line is the new input text; lines starting with `:` are commands.
fn parse_line(line: &str) -> Result<LineCommand, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(LineCommand::Event(SessionEvent::Input(line.to_owned())));
    };

    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("focus") => Ok(LineCommand::Event(SessionEvent::Focus)),
        Some("blur") => Ok(LineCommand::Event(SessionEvent::Blur)),
        Some("quit") => Ok(LineCommand::Quit),
        Some("select") => {
            let rest: Vec<&str> = parts.collect();
            let (panel, number) = match rest.as_slice() {
                [number] => (Panel::AllMatches, *number),
                [panel, number] => (parse_panel(panel)?, *number),
                _ => return Err(String::from("usage: :select [matches|recent|popular] N")),
            };
            let index = number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| format!("row number must be 1 or greater: '{number}'"))?;
            Ok(LineCommand::Event(SessionEvent::Select { panel, index }))
        }
        _ => Err(format!("unknown command '{line}'")),
    }
}

fn parse_panel(value: &str) -> Result<Panel, String> {
    match value {
        "matches" | "all" => Ok(Panel::AllMatches),
        "recent" => Ok(Panel::Recent),
        "popular" => Ok(Panel::Popular),
        other => Err(format!(
            "unknown panel '{other}', expected one of matches, recent, popular"
        )),
    }
}
