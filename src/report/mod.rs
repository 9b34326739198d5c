//! Report assembler
//!
//! Turns aggregation results into titled [`ReportTable`]s. Money and
//! percentage cells are already rounded by the engine; this layer only
//! formats them.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::aggregate::{
    menu_category_counts, CategoryCount, CategoryQuantity, CategoryRanking, CategoryShare,
    CumulativeRevenuePoint, HourlyOrders, PizzaQuantity, PizzaRevenue, QuantityBucket,
    SalesAnalytics,
};
use crate::error::Result;
use crate::model::SalesData;

pub mod rounding;
pub mod table;

pub use table::{render_all, OutputFormat, ReportRow, ReportTable};

/// The reports the assembler knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Summary,
    TopQuantity,
    QuantityHistogram,
    CategoryTotals,
    Hourly,
    CategoryCounts,
    Menu,
    TopRevenue,
    RevenueShare,
    CumulativeRevenue,
    TopPerCategory,
}

impl ReportKind {
    pub const ALL: [ReportKind; 11] = [
        Self::Summary,
        Self::TopQuantity,
        Self::QuantityHistogram,
        Self::CategoryTotals,
        Self::Hourly,
        Self::CategoryCounts,
        Self::Menu,
        Self::TopRevenue,
        Self::RevenueShare,
        Self::CumulativeRevenue,
        Self::TopPerCategory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::TopQuantity => "top-quantity",
            Self::QuantityHistogram => "quantity-histogram",
            Self::CategoryTotals => "category-totals",
            Self::Hourly => "hourly",
            Self::CategoryCounts => "category-counts",
            Self::Menu => "menu",
            Self::TopRevenue => "top-revenue",
            Self::RevenueShare => "revenue-share",
            Self::CumulativeRevenue => "cumulative-revenue",
            Self::TopPerCategory => "top-per-category",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown report '{s}'"))
    }
}

/// Limits applied by the ranking reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_n: usize,
    pub per_category_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            per_category_limit: 3,
        }
    }
}

/// Build one report from the loaded tables and their joined rows
pub fn assemble(
    kind: ReportKind,
    data: &SalesData,
    analytics: &SalesAnalytics<'_>,
    options: &ReportOptions,
) -> Result<ReportTable> {
    debug!("Assembling {} report over {} rows", kind, analytics.rows().len());

    let table = match kind {
        ReportKind::Summary => {
            let summary = analytics.summary();
            let mut table = ReportTable::new("Summary", &["metric", "value"]);
            push_metric(&mut table, "total_orders", &summary.total_orders)?;
            push_metric(&mut table, "total_revenue", &summary.total_revenue)?;
            // null in JSON, "n/a" in text and CSV
            let avg_cell = summary
                .avg_daily_quantity
                .map(|q| q.to_string())
                .unwrap_or_else(|| "n/a".to_string());
            table.push_typed_row(
                vec!["avg_daily_quantity".to_string(), avg_cell],
                json!({
                    "metric": "avg_daily_quantity",
                    "value": summary.avg_daily_quantity,
                }),
            );
            table
        }
        ReportKind::TopQuantity => ReportTable::from_records(
            format!("Top {} pizzas by quantity", options.top_n),
            &analytics.top_n_by_quantity(options.top_n),
        )?,
        ReportKind::QuantityHistogram => ReportTable::from_records(
            "Order lines by quantity",
            &analytics.quantity_histogram(),
        )?,
        ReportKind::CategoryTotals => {
            ReportTable::from_records("Quantity by category", &analytics.category_totals())?
        }
        ReportKind::Hourly => {
            ReportTable::from_records("Orders by hour", &analytics.hourly_distribution())?
        }
        ReportKind::CategoryCounts => ReportTable::from_records(
            "Pizza types sold per category",
            &analytics.category_counts(),
        )?,
        ReportKind::Menu => ReportTable::from_records(
            "Pizza types on the menu per category",
            &menu_category_counts(data.pizza_types()),
        )?,
        ReportKind::TopRevenue => ReportTable::from_records(
            format!("Top {} pizzas by revenue", options.top_n),
            &analytics.top_n_by_revenue(options.top_n),
        )?,
        ReportKind::RevenueShare => ReportTable::from_records(
            "Revenue share by category",
            &analytics.revenue_percent_by_category()?,
        )?,
        ReportKind::CumulativeRevenue => ReportTable::from_records(
            "Cumulative revenue by date",
            &analytics.cumulative_revenue_by_date().to_vec(),
        )?,
        ReportKind::TopPerCategory => ReportTable::from_records(
            format!(
                "Top {} pizzas by revenue per category",
                options.per_category_limit
            ),
            &analytics.top_n_by_revenue_per_category(options.per_category_limit),
        )?,
    };

    Ok(table)
}

fn push_metric<V>(table: &mut ReportTable, metric: &str, value: &V) -> Result<()>
where
    V: Serialize + fmt::Display,
{
    let typed = serde_json::to_value(value)?;
    table.push_typed_row(
        vec![metric.to_string(), value.to_string()],
        json!({ "metric": metric, "value": typed }),
    );
    Ok(())
}

impl ReportRow for PizzaQuantity {
    const COLUMNS: &'static [&'static str] = &["name", "quantity"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.quantity.to_string()]
    }
}

impl ReportRow for QuantityBucket {
    const COLUMNS: &'static [&'static str] = &["quantity", "order_lines"];

    fn cells(&self) -> Vec<String> {
        vec![self.quantity.to_string(), self.line_count.to_string()]
    }
}

impl ReportRow for CategoryQuantity {
    const COLUMNS: &'static [&'static str] = &["category", "quantity"];

    fn cells(&self) -> Vec<String> {
        vec![self.category.clone(), self.quantity.to_string()]
    }
}

impl ReportRow for HourlyOrders {
    const COLUMNS: &'static [&'static str] = &["hour", "order_count"];

    fn cells(&self) -> Vec<String> {
        vec![self.hour.to_string(), self.order_count.to_string()]
    }
}

impl ReportRow for CategoryCount {
    const COLUMNS: &'static [&'static str] = &["category", "pizza_types"];

    fn cells(&self) -> Vec<String> {
        vec![self.category.clone(), self.pizza_type_count.to_string()]
    }
}

impl ReportRow for PizzaRevenue {
    const COLUMNS: &'static [&'static str] = &["name", "revenue"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.revenue.to_string()]
    }
}

impl ReportRow for CategoryShare {
    const COLUMNS: &'static [&'static str] = &["category", "revenue_percent"];

    fn cells(&self) -> Vec<String> {
        vec![self.category.clone(), self.revenue_percent.to_string()]
    }
}

impl ReportRow for CumulativeRevenuePoint {
    const COLUMNS: &'static [&'static str] = &["order_date", "cumulative_revenue"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_date.format("%Y-%m-%d").to_string(),
            self.cumulative_revenue.to_string(),
        ]
    }
}

impl ReportRow for CategoryRanking {
    const COLUMNS: &'static [&'static str] = &["category", "name", "revenue", "rank"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            self.name.clone(),
            self.revenue.to_string(),
            self.rank.to_string(),
        ]
    }
}
