use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::time::Duration;

/// Label of the period field carried by every statement record
pub const PERIOD_FIELD: &str = "Rok";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    IncomeStatement,
    BalanceSheet,
    CashFlowStatement,
    MarketValue,
    Profitability,
    CashFlowRatios,
    Debt,
    Liquidity,
    Activity,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::IncomeStatement,
        Category::BalanceSheet,
        Category::CashFlowStatement,
        Category::MarketValue,
        Category::Profitability,
        Category::CashFlowRatios,
        Category::Debt,
        Category::Liquidity,
        Category::Activity,
    ];

    /// URL path segment, also used to name the output files
    pub fn path(&self) -> &'static str {
        match self {
            Category::IncomeStatement => "raporty-finansowe-rachunek-zyskow-i-strat",
            Category::BalanceSheet => "raporty-finansowe-bilans",
            Category::CashFlowStatement => "raporty-finansowe-przeplywy-pieniezne",
            Category::MarketValue => "wskazniki-wartosci-rynkowej",
            Category::Profitability => "wskazniki-rentownosci",
            Category::CashFlowRatios => "wskazniki-przeplywow-pienieznych",
            Category::Debt => "wskazniki-zadluzenia",
            Category::Liquidity => "wskazniki-plynnosci",
            Category::Activity => "wskazniki-aktywnosci",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PipelineKind {
    Financial,
    Price,
}

impl PipelineKind {
    pub fn as_str(&self) -> &str {
        match self {
            PipelineKind::Financial => "financial",
            PipelineKind::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn file_extension(&self) -> &str {
        match self {
            OutputFormat::Json => "txt",
            OutputFormat::Csv => "csv",
        }
    }
}

/// HTML fragment holding exactly one located table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable(String);

impl RawTable {
    pub fn new(html: impl Into<String>) -> Self {
        RawTable(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One statement row: metric label plus one value per period column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub label: String,
    pub values: Vec<String>,
}

/// Price rows gathered across every fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Ordered label -> value mapping; re-inserting a label keeps its position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &str, value: impl Into<String>) {
        self.0.insert(label.to_string(), Value::String(value.into()));
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).and_then(Value::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Records plus the column order used for tabular output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new<I, S>(columns: I, records: Vec<Record>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let columns = columns
            .into_iter()
            .map(Into::into)
            .filter(|c: &String| seen.insert(c.clone()))
            .collect();
        RecordSet { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-run knobs coming from the command line
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub max_pages: usize,
    pub delay: Duration,
    pub output: OutputFormat,
    pub offline: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_pages: 5,
            delay: Duration::from_millis(100),
            output: OutputFormat::Json,
            offline: false,
        }
    }
}

/// Outcome of one stock's pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Output files written
    pub written: usize,
    /// Units skipped because their table was missing or malformed
    pub skipped: usize,
    /// Records across all written outputs
    pub records: usize,
}
