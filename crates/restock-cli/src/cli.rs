//! CLI argument definitions using clap.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use restock::{NumberFormat, RestockConfig};

/// Restock: replenishment suggestions for multi-channel sellers
#[derive(Parser)]
#[command(name = "restock")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file (flags override its values)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate purchase suggestions for one company
    Calculate {
        /// Fulfillment report (sales 60d, fulfillment stock, in transit)
        #[arg(long, value_name = "FILE")]
        fulfillment: PathBuf,

        /// Physical warehouse report (stock, unit cost)
        #[arg(long, value_name = "FILE")]
        physical: PathBuf,

        /// Direct sales report (quantity sold in the last 60 days)
        #[arg(long, value_name = "FILE")]
        sales: PathBuf,

        /// Directory holding the catalog and kit sheets
        #[arg(long, value_name = "DIR")]
        workbook: PathBuf,

        /// Company name, used in logs
        #[arg(long)]
        company: Option<String>,

        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Calculate every company of a manifest and print one table
    Consolidate {
        /// Manifest listing the workbook and each company's reports
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// Keep only rows of this supplier
        #[arg(long)]
        supplier: Option<String>,

        /// Keep only rows of this company
        #[arg(long)]
        company_filter: Option<String>,

        /// Keep only SKUs containing this text
        #[arg(long)]
        sku: Option<String>,

        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Split a received quantity between companies by sales share
    Allocate {
        /// Manifest listing the workbook and each company's reports
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// SKU being allocated
        #[arg(long)]
        sku: String,

        /// Units received
        #[arg(short, long)]
        quantity: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Draft a numbered purchase order for one supplier
    Order {
        /// Manifest listing the workbook and each company's reports
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// Supplier to order from
        #[arg(long)]
        supplier: String,

        /// Restrict the order to one company
        #[arg(long)]
        company: Option<String>,

        /// Order date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Sequence number of the order within the day
        #[arg(long, default_value = "1")]
        sequence: u32,

        /// Change a suggested quantity (repeatable)
        #[arg(long = "set", value_name = "SKU@COMPANY=QTY")]
        set: Vec<String>,

        /// Add an item that was not suggested (repeatable)
        #[arg(long = "add", value_name = "SKU=QTY")]
        add: Vec<String>,

        /// Output path for the order JSON (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        params: ParamArgs,
    },
}

/// Calculation parameters shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Days of stock the fulfillment warehouse should cover
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Supplier lead time in days
    #[arg(long)]
    pub lead_time: Option<u32>,

    /// Expected monthly sales growth, in percent
    #[arg(long, allow_negative_numbers = true)]
    pub growth: Option<f64>,

    /// Number format of the reports (plain, br)
    #[arg(long)]
    pub table_format: Option<TableFormatChoice>,
}

impl ParamArgs {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply(&self, mut config: RestockConfig) -> RestockConfig {
        if let Some(horizon) = self.horizon {
            config.params.horizon_days = horizon;
        }
        if let Some(lead_time) = self.lead_time {
            config.params.lead_time_days = lead_time;
        }
        if let Some(growth) = self.growth {
            config.params.growth_percent = growth;
        }
        if let Some(format) = self.table_format {
            config.table_format = format.into();
        }
        config
    }
}

/// Where and how a table is written.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (csv, tsv, json)
    #[arg(short, long, default_value = "csv")]
    pub format: OutputFormat,
}

/// Output format for tables
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    /// Field delimiter, or `None` for JSON.
    pub fn delimiter(self) -> Option<u8> {
        match self {
            OutputFormat::Csv => Some(b','),
            OutputFormat::Tsv => Some(b'\t'),
            OutputFormat::Json => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" | "tab" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Number format of the input reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormatChoice {
    /// `1,234.56`
    Plain,
    /// `R$ 1.234,56`
    Brazilian,
}

impl std::str::FromStr for TableFormatChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "us" => Ok(TableFormatChoice::Plain),
            "br" | "brazilian" | "pt-br" => Ok(TableFormatChoice::Brazilian),
            _ => Err(format!("Unknown number format: {}. Use plain or br.", s)),
        }
    }
}

impl From<TableFormatChoice> for NumberFormat {
    fn from(choice: TableFormatChoice) -> Self {
        match choice {
            TableFormatChoice::Plain => NumberFormat::Plain,
            TableFormatChoice::Brazilian => NumberFormat::Brazilian,
        }
    }
}
