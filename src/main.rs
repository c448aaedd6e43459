use clap::{CommandFactory, Parser};
use anyhow::Result;
use tracing::{info, error};

use bizdump::cli::Cli;
use bizdump::config::Config;
use bizdump::fetch::HttpFetcher;
use bizdump::models::Category;
use bizdump::pipeline::Pipeline;
use bizdump::storage::ArtifactStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "bizdump=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let file_appender = tracing_appender::rolling::never(".", "bizdump.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env())
        )
        .init();

    let cli = Cli::parse();
    let stocks = cli.stocks();
    if stocks.is_empty() {
        Cli::command()
            .error(clap::error::ErrorKind::ValueValidation, "--stock needs at least one ticker")
            .exit();
    }

    let mut config = Config::from_env()?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    config.validate()?;

    let fetcher = HttpFetcher::new(&config)?;
    let store = ArtifactStore::new(&config.data_dir);
    let pipeline = Pipeline::new(&fetcher, &store, config.base_url.clone(), cli.settings());

    let mut failed = Vec::new();
    for stock in &stocks {
        match pipeline.run_stock(cli.kind, stock, &Category::ALL).await {
            Ok(summary) => info!(
                "{}: {} files written, {} records, {} skipped",
                stock, summary.written, summary.records, summary.skipped
            ),
            Err(e) => {
                error!("{} failed: {}", stock, e);
                failed.push(stock.as_str());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("{} of {} stocks failed: {}", failed.len(), stocks.len(), failed.join(", "));
    }

    Ok(())
}
