use tracing::{debug, info};

use crate::errors::Result;
use crate::fetch::{FetchOutcome, PageFetcher};
use crate::models::{Category, PipelineKind, RunSettings, RunSummary};
use crate::storage::ArtifactStore;

pub mod financial;
pub mod price;

/// Everything one stock's run needs, passed in rather than read from globals
pub struct Pipeline<'a> {
    fetcher: &'a dyn PageFetcher,
    store: &'a ArtifactStore,
    base_url: String,
    settings: RunSettings,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        store: &'a ArtifactStore,
        base_url: impl Into<String>,
        settings: RunSettings,
    ) -> Self {
        Self {
            fetcher,
            store,
            base_url: base_url.into(),
            settings,
        }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub async fn run_stock(&self, kind: PipelineKind, stock: &str, categories: &[Category]) -> Result<RunSummary> {
        info!("Starting {} pipeline for stock: {}", kind.as_str(), stock);
        match kind {
            PipelineKind::Financial => self.financial(stock, categories).await,
            PipelineKind::Price => self.price(stock).await,
        }
    }

    /// Fetch one page, then wait out the configured delay
    async fn fetch_paced(&self, url: &str) -> Result<FetchOutcome> {
        let outcome = self.fetcher.fetch(url).await;
        if !self.settings.delay.is_zero() {
            debug!("Sleeping {:?} after {}", self.settings.delay, url);
            tokio::time::sleep(self.settings.delay).await;
        }
        outcome
    }
}

/// Split a comma separated ticker list, trimming and dropping empties
pub fn parse_stocks(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
