use std::path::PathBuf;

use clap::{Parser, Subcommand};

use iex_batch::BatchType;

#[derive(Parser)]
#[command(name = "iex-batch")]
#[command(about = "Fetch several market data categories in one batch request")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON file with base_url, token and timeout_secs
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Batch request for a single symbol
    Symbol {
        symbol: String,

        /// Comma separated data categories (e.g. quote,news,chart)
        #[arg(short, long, value_delimiter = ',', default_value = "quote")]
        types: Vec<BatchType>,

        /// Extra query pair, repeatable (e.g. --param range=1m)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Batch request for several symbols at once
    Market {
        /// Comma separated symbols (e.g. AAPL,MSFT)
        #[arg(value_delimiter = ',', required = true)]
        symbols: Vec<String>,

        #[arg(short, long, value_delimiter = ',', default_value = "quote")]
        types: Vec<BatchType>,

        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.trim().is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
