mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use cli::{Cli, Commands};
use iex_batch::config::{apply_env_overrides, load_client_config, ClientConfig};
use iex_batch::fetch::{ApiResponse, RestExecutor};
use iex_batch::{BatchService, OptionalParameters};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_client_config(path).context("Failed to load configuration")?,
        None => ClientConfig::builtin(),
    };
    let config = apply_env_overrides(config).context("Invalid environment override")?;
    if config.token.is_none() {
        warn!("No API token configured; set IEX_TOKEN or add `token` to the config file");
    }
    info!("Using endpoint {}", config.base_url);

    let service = BatchService::new(RestExecutor::new(config)?);

    match cli.command {
        Commands::Symbol {
            symbol,
            types,
            params,
        } => {
            let optional = into_optional(params);
            let response = service
                .batch_by_symbol(&symbol, &types, optional.as_ref())
                .await?;
            print_response(response)
        }
        Commands::Market {
            symbols,
            types,
            params,
        } => {
            let optional = into_optional(params);
            let response = service
                .batch_by_market(&symbols, &types, optional.as_ref())
                .await?;
            print_response(response)
        }
    }
}

fn into_optional(params: Vec<(String, String)>) -> Option<OptionalParameters> {
    if params.is_empty() {
        None
    } else {
        Some(params.into_iter().collect())
    }
}

fn print_response<T: Serialize>(response: ApiResponse<T>) -> Result<()> {
    let data = response.into_result()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&data).context("Failed to render response")?
    );
    Ok(())
}
