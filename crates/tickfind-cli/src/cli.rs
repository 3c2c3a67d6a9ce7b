//! CLI argument definitions for tickfind.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | One-shot ticker lookup |
//! | `interactive` | Line-driven search box session |
//! | `suggestions` | Show the Recent/Popular suggestion panels |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--endpoint` | `$TICKFIND_ENDPOINT` or built-in | Search API endpoint template |
//! | `--debounce-ms` | `300` | Quiet window before input is searched |
//! | `--stale-ms` | `10000` | How long results are served from cache |
//! | `--timeout-ms` | `3000` | Request timeout in ms |
//! | `--log-level` | `warn` | Log level when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! tickfind search aapl
//! tickfind search "S&P" --format json --pretty
//! printf 'A\nAA\nAAPL\n' | tickfind interactive
//! ```

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickfind_core::SearchConfig;

use crate::error::CliError;

/// Environment fallback for `--endpoint`.
pub const ENDPOINT_ENV: &str = "TICKFIND_ENDPOINT";

/// Debounced ticker-symbol search
#[derive(Debug, Parser)]
#[command(
    name = "tickfind",
    author,
    version,
    about = "Debounced ticker-symbol search",
    long_about = "tickfind looks up ticker symbols against a remote search API the way a \
search box does: input is debounced, results are cached briefly per query, and \
records are normalized to symbol, name and exchange.\n\
\n\
Use 'tickfind <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Search API endpoint. `{query}` is replaced by the search text;
    /// without it the text is appended as a path segment.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Quiet window in milliseconds before typed input is searched.
    #[arg(long, global = true, default_value_t = 300)]
    pub debounce_ms: u64,

    /// How long a successful result is served without refetching.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub stale_ms: u64,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 3_000)]
    pub timeout_ms: u64,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Session configuration from flags, falling back to the environment for the endpoint.
    pub fn config(&self) -> Result<SearchConfig, CliError> {
        let endpoint = self
            .endpoint
            .clone()
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .filter(|value| !value.trim().is_empty());

        let mut config = SearchConfig::default()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_stale_time(Duration::from_millis(self.stale_ms))
            .with_timeout_ms(self.timeout_ms);
        if let Some(endpoint) = endpoint {
            config = config.with_endpoint(endpoint);
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable rows.
    Table,
    /// JSON; one object per view in interactive mode.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 🔍 Look up tickers matching a query.
    ///
    /// # Examples
    ///
    ///   tickfind search apple
    ///   tickfind search aa --limit 5
    Search(SearchArgs),

    /// ⌨️ Run a search box session fed from stdin.
    ///
    /// Each line replaces the input text. Commands:
    ///   :focus / :blur          toggle input focus
    ///   :select [PANEL] N       pick row N (panel: matches, recent, popular)
    ///   :quit                   stop reading input
    Interactive(InteractiveArgs),

    /// 📋 Show the Recent and Popular suggestion panels.
    Suggestions,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search text (symbol or company name).
    pub query: String,

    /// Maximum number of rows to print.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Start with the input unfocused.
    #[arg(long, default_value_t = false)]
    pub unfocused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_command_parses_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tickfind",
            "search",
            "aapl",
            "--limit",
            "3",
            "--format",
            "json",
            "--endpoint",
            "https://api.example.test/search",
        ])
        .expect("valid arguments");

        assert_eq!(cli.format, OutputFormat::Json);
        match &cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "aapl");
                assert_eq!(args.limit, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let config = cli.config().expect("valid config");
        assert_eq!(config.endpoint, "https://api.example.test/search");
        assert_eq!(config.debounce, Duration::from_millis(300));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let cli = Cli::try_parse_from(["tickfind", "suggestions", "--endpoint", "ftp://nope"])
            .expect("valid arguments");
        assert!(matches!(cli.config(), Err(CliError::Config(_))));
    }
}
