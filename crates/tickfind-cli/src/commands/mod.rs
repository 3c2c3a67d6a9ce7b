mod interactive;
mod search;
mod suggestions;

use std::sync::Arc;

use tickfind_core::{ReqwestHttpClient, SearchApi};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.config()?;
    let api = SearchApi::new(Arc::new(ReqwestHttpClient::new()), &config);

    match &cli.command {
        Command::Search(args) => search::run(args, &api, &config, cli.format, cli.pretty).await,
        Command::Interactive(args) => {
            interactive::run(args, api, &config, cli.format, cli.pretty).await
        }
        Command::Suggestions => suggestions::run(cli.format, cli.pretty),
    }
}
