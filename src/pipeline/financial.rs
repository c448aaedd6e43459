//! Financial statement pipeline: one table per category, pivoted by period

use tracing::{debug, error, info, warn};

use super::Pipeline;
use crate::errors::{Result, ScrapeError};
use crate::fetch::FetchOutcome;
use crate::models::{Category, RawTable, RecordSet, RunSummary};
use crate::{output, pivot, table};

impl Pipeline<'_> {
    /// Dump every requested category for one stock.
    ///
    /// An unavailable page or a never-fetched stock aborts the stock; a page
    /// without a table (or no cached table) or a malformed row only skips
    /// its category.
    pub async fn financial(&self, stock: &str, categories: &[Category]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for category in categories {
            let Some(raw) = self.statement_table(stock, *category).await? else {
                warn!("No report table for {} / {}, skipping", stock, category.path());
                summary.skipped += 1;
                continue;
            };

            let set = match parse_statement(&raw) {
                Ok(set) => set,
                Err(e) => {
                    error!("Failed to parse {} / {}: {}", stock, category.path(), e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let rendered = output::render(&set, self.settings.output)?;
            let path = self
                .store
                .write_output(stock, category.path(), self.settings.output, &rendered)
                .await?;
            info!("Wrote {} periods to {}", set.len(), path.display());

            summary.written += 1;
            summary.records += set.len();
        }

        info!(
            "Finished {}: {} categories written, {} skipped",
            stock, summary.written, summary.skipped
        );
        Ok(summary)
    }

    async fn statement_table(&self, stock: &str, category: Category) -> Result<Option<RawTable>> {
        if self.settings.offline {
            return self.store.read_statement_raw(stock, category).await;
        }

        let url = format!("{}/{}/{}", self.base_url, category.path(), stock);
        let body = match self.fetch_paced(&url).await? {
            FetchOutcome::Fetched(body) => body,
            FetchOutcome::Unavailable { status } => {
                return Err(ScrapeError::FetchStatus { url, status });
            }
        };

        let Some(raw) = table::locate(&body, table::STATEMENT_TABLE_CLASS)? else {
            self.store.remove_statement_raw(stock, category).await?;
            return Ok(None);
        };
        let path = self.store.write_statement_raw(stock, category, &raw).await?;
        debug!("Cached report table at {}", path.display());
        Ok(Some(raw))
    }
}

/// Headers, rows and pivot for one located statement table
pub fn parse_statement(raw: &RawTable) -> Result<RecordSet> {
    let periods = table::extract_headers(raw)?;
    let rows = table::extract_rows(raw)?;
    pivot::statement(&periods, &rows)
}
