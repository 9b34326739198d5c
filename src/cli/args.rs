//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::{OutputFormat, ReportKind};

/// Reporting metrics for pizza sales data
#[derive(Debug, Parser)]
#[command(name = "pizza-analytics")]
#[command(about = "pizza-analytics - Sales reports over orders, order details, pizzas and pizza types", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing orders.csv, order_details.csv, pizzas.csv and pizza_types.csv
    #[arg(short = 'd', long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format: table, csv or json
    #[arg(short = 'f', long, global = true)]
    pub format: Option<OutputFormat>,

    /// Drop order details whose references do not resolve instead of failing
    #[arg(long, global = true)]
    pub lenient_joins: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Total orders, total revenue and average pizzas per day (default)
    Summary,
    /// Pizzas with the highest quantity sold
    TopQuantity {
        /// Number of pizzas to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Number of order lines for each quantity value
    QuantityHistogram,
    /// Quantity sold per category
    CategoryTotals,
    /// Distinct orders per hour of the day
    Hourly,
    /// Distinct pizza types sold per category
    CategoryCounts,
    /// Pizza types on the menu per category
    Menu,
    /// Pizzas with the highest revenue
    TopRevenue {
        /// Number of pizzas to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Each category's percentage of total revenue
    RevenueShare,
    /// Running revenue total by date
    CumulativeRevenue,
    /// Highest-revenue pizzas within each category
    TopPerCategory {
        /// Maximum rank to keep per category
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Every report, one after another
    All,
}

impl Commands {
    /// The reports this command produces, in output order
    pub fn report_kinds(&self) -> Vec<ReportKind> {
        match self {
            Self::Summary => vec![ReportKind::Summary],
            Self::TopQuantity { .. } => vec![ReportKind::TopQuantity],
            Self::QuantityHistogram => vec![ReportKind::QuantityHistogram],
            Self::CategoryTotals => vec![ReportKind::CategoryTotals],
            Self::Hourly => vec![ReportKind::Hourly],
            Self::CategoryCounts => vec![ReportKind::CategoryCounts],
            Self::Menu => vec![ReportKind::Menu],
            Self::TopRevenue { .. } => vec![ReportKind::TopRevenue],
            Self::RevenueShare => vec![ReportKind::RevenueShare],
            Self::CumulativeRevenue => vec![ReportKind::CumulativeRevenue],
            Self::TopPerCategory { .. } => vec![ReportKind::TopPerCategory],
            Self::All => ReportKind::ALL.to_vec(),
        }
    }
}
