use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::errors::{Result, ScrapeError};
use crate::models::{Category, OutputFormat, RawTable};

/// Category name used for price-history output files
pub const PRICE_CATEGORY: &str = "price";

/// Raw tables and rendered outputs, one directory per stock
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stock_dir(&self, stock: &str) -> PathBuf {
        self.root.join(stock)
    }

    pub fn statement_raw_path(&self, stock: &str, category: Category) -> PathBuf {
        self.stock_dir(stock)
            .join(format!("data_{}_{}.txt", stock, category.path()))
    }

    pub fn price_raw_path(&self, stock: &str, page: usize) -> PathBuf {
        self.stock_dir(stock)
            .join(format!("data_price_{}_{}.txt", stock, page))
    }

    pub fn output_path(&self, stock: &str, category: &str, format: OutputFormat) -> PathBuf {
        self.stock_dir(stock)
            .join(format!("{}_{}.{}", stock, category, format.file_extension()))
    }

    pub async fn write_statement_raw(&self, stock: &str, category: Category, table: &RawTable) -> Result<PathBuf> {
        let path = self.statement_raw_path(stock, category);
        self.write(&path, table.as_str()).await?;
        Ok(path)
    }

    pub async fn write_price_raw(&self, stock: &str, page: usize, table: &RawTable) -> Result<PathBuf> {
        let path = self.price_raw_path(stock, page);
        self.write(&path, table.as_str()).await?;
        Ok(path)
    }

    pub async fn write_output(&self, stock: &str, category: &str, format: OutputFormat, content: &str) -> Result<PathBuf> {
        let path = self.output_path(stock, category, format);
        self.write(&path, content).await?;
        Ok(path)
    }

    /// Cached statement table; `None` when that category had no table.
    /// A missing stock directory means the stock was never fetched.
    pub async fn read_statement_raw(&self, stock: &str, category: Category) -> Result<Option<RawTable>> {
        self.ensure_stock_dir(stock).await?;
        read_optional(&self.statement_raw_path(stock, category)).await
    }

    /// Cached price page; `None` once pagination is exhausted
    pub async fn read_price_raw(&self, stock: &str, page: usize) -> Result<Option<RawTable>> {
        self.ensure_stock_dir(stock).await?;
        read_optional(&self.price_raw_path(stock, page)).await
    }

    /// Drop a category's cached table so offline runs skip it like online ones
    pub async fn remove_statement_raw(&self, stock: &str, category: Category) -> Result<()> {
        remove_if_exists(&self.statement_raw_path(stock, category)).await?;
        Ok(())
    }

    /// Drop cached price pages from `first_page` on, left by earlier longer runs
    pub async fn remove_price_raw_from(&self, stock: &str, first_page: usize) -> Result<usize> {
        let mut removed = 0;
        let mut page = first_page;
        while remove_if_exists(&self.price_raw_path(stock, page)).await? {
            removed += 1;
            page += 1;
        }
        Ok(removed)
    }

    async fn ensure_stock_dir(&self, stock: &str) -> Result<()> {
        let dir = self.stock_dir(stock);
        if !fs::try_exists(&dir).await? {
            return Err(ScrapeError::MissingRawData(dir));
        }
        Ok(())
    }

    async fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

async fn read_optional(path: &Path) -> Result<Option<RawTable>> {
    match fs::read_to_string(path).await {
        Ok(html) => Ok(Some(RawTable::new(html))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed stale {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
