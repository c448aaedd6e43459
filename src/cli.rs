use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::{OutputFormat, PipelineKind, RunSettings};
use crate::pipeline::parse_stocks;

#[derive(Parser, Debug)]
#[command(name = "bizdump")]
#[command(about = "Dump biznesradar.pl financial statements and price history to JSON or CSV")]
#[command(version)]
pub struct Cli {
    /// Pipeline to run (financial, price)
    #[arg(long = "type", value_enum)]
    pub kind: PipelineKind,

    /// Comma separated stock tickers
    #[arg(long)]
    pub stock: String,

    /// Maximum number of price pages to fetch
    #[arg(long = "max_iters", default_value = "5")]
    pub max_iters: usize,

    /// Delay between page fetches in milliseconds
    #[arg(long, default_value = "100")]
    pub delay: u64,

    /// Output format (json, csv)
    #[arg(long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Parse previously stored raw tables instead of fetching
    #[arg(long)]
    pub offline: bool,

    /// Data directory, overrides BIZDUMP_DATA_DIR
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    pub fn stocks(&self) -> Vec<String> {
        parse_stocks(&self.stock)
    }

    pub fn settings(&self) -> RunSettings {
        RunSettings {
            max_pages: self.max_iters,
            delay: Duration::from_millis(self.delay),
            output: self.output,
            offline: self.offline,
        }
    }
}
