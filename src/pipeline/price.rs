//! Price history pipeline: paginated daily rows, one record per day

use tracing::{debug, info, warn};

use super::Pipeline;
use crate::errors::Result;
use crate::fetch::FetchOutcome;
use crate::models::{RawTable, RunSummary};
use crate::storage::PRICE_CATEGORY;
use crate::{output, pivot, table};

impl Pipeline<'_> {
    /// Gather up to `max_pages` pages and dump them as one record set.
    ///
    /// Pagination stops at the first unavailable page or page without a
    /// table; rows gathered so far are still written.
    pub async fn price(&self, stock: &str) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut pages = Vec::new();

        for page in 1..=self.settings.max_pages {
            match self.price_page(stock, page).await? {
                Some(raw) => pages.push(raw),
                None => {
                    debug!("Pagination for {} ended before page {}", stock, page);
                    break;
                }
            }
        }

        if !self.settings.offline {
            let removed = self.store.remove_price_raw_from(stock, pages.len() + 1).await?;
            if removed > 0 {
                debug!("Removed {} stale price pages for {}", removed, stock);
            }
        }

        if pages.is_empty() {
            warn!("No price data available for {}", stock);
            summary.skipped += 1;
            return Ok(summary);
        }

        let price_table = table::extract_price_rows(&pages)?;
        let set = pivot::price(&price_table);

        let rendered = output::render(&set, self.settings.output)?;
        let path = self
            .store
            .write_output(stock, PRICE_CATEGORY, self.settings.output, &rendered)
            .await?;
        info!(
            "Wrote {} trading days from {} pages to {}",
            set.len(),
            pages.len(),
            path.display()
        );

        summary.written += 1;
        summary.records += set.len();
        Ok(summary)
    }

    async fn price_page(&self, stock: &str, page: usize) -> Result<Option<RawTable>> {
        if self.settings.offline {
            return self.store.read_price_raw(stock, page).await;
        }

        let url = format!("{}/notowania-historyczne/{},{}", self.base_url, stock, page);
        let body = match self.fetch_paced(&url).await? {
            FetchOutcome::Fetched(body) => body,
            FetchOutcome::Unavailable { status } => {
                info!("Page {} for {} unavailable (HTTP {})", page, stock, status);
                return Ok(None);
            }
        };

        let Some(raw) = table::locate(&body, table::PRICE_TABLE_CLASS)? else {
            warn!("No price table on page {} for {}", page, stock);
            return Ok(None);
        };
        self.store.write_price_raw(stock, page, &raw).await?;
        Ok(Some(raw))
    }
}
