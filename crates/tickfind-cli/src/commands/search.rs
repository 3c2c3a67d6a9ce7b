use serde::Serialize;
use tickfind_core::{ResultRow, SearchApi, SearchConfig};

use crate::cli::{OutputFormat, SearchArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct SearchResponseData {
    query: String,
    results: Vec<ResultRow>,
}

pub async fn run(
    args: &SearchArgs,
    api: &SearchApi,
    config: &SearchConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    if args.limit == Some(0) {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let query = checked_query(&args.query, config.min_query_len)?;
    let payload = api.search(query).await?;

    let results: Vec<ResultRow> = payload
        .rows()
        .iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(ResultRow::from)
        .collect();

    match format {
        OutputFormat::Table => {
            output::render_rows(&results);
            Ok(())
        }
        OutputFormat::Json => output::render_json(
            &SearchResponseData {
                query: query.to_owned(),
                results,
            },
            pretty,
        ),
    }
}

/// Trimmed query text, rejected when shorter than `min_len` characters.
fn checked_query(raw: &str, min_len: usize) -> Result<&str, CliError> {
    let query = raw.trim();
    if query.chars().count() < min_len {
        return Err(CliError::Command(format!(
            "query must be at least {min_len} characters"
        )));
    }
    Ok(query)
}
