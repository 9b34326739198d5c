//! Result records returned by the aggregation engine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::rounding::round_money;
use crate::window::prefix_sum;

/// Total quantity sold for one pizza name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaQuantity {
    pub name: String,
    pub quantity: u64,
}

/// Number of order lines that ordered exactly `quantity` pizzas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityBucket {
    pub quantity: u64,
    #[serde(rename = "order_lines")]
    pub line_count: u64,
}

/// Total quantity sold in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryQuantity {
    pub category: String,
    pub quantity: u64,
}

/// Distinct orders placed in one hour of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyOrders {
    pub hour: u32,
    pub order_count: u64,
}

/// Distinct pizza types in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    #[serde(rename = "pizza_types")]
    pub pizza_type_count: u64,
}

/// Revenue for one pizza name, rounded to cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaRevenue {
    pub name: String,
    pub revenue: Decimal,
}

/// A category's share of total revenue, in percent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub revenue_percent: Decimal,
}

/// Running revenue total at the end of `order_date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeRevenuePoint {
    pub order_date: NaiveDate,
    pub cumulative_revenue: Decimal,
}

/// A pizza's revenue rank inside its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRanking {
    pub category: String,
    pub name: String,
    pub revenue: Decimal,
    pub rank: usize,
}

/// Headline numbers for a data set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    /// `None` when there are no rows to average
    pub avg_daily_quantity: Option<u64>,
}

/// Daily revenue in date order, scanned lazily into running totals
///
/// Holds the per-date sums (the intermediate table) once; every call to
/// [`CumulativeRevenue::iter`] starts a fresh prefix scan over them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CumulativeRevenue {
    daily: Vec<(NaiveDate, Decimal)>,
}

impl CumulativeRevenue {
    /// `daily` must be sorted ascending by date with one entry per date
    pub(crate) fn from_daily(daily: Vec<(NaiveDate, Decimal)>) -> Self {
        Self { daily }
    }

    /// Per-date revenue before accumulation
    pub fn daily(&self) -> &[(NaiveDate, Decimal)] {
        &self.daily
    }

    pub fn iter(&self) -> impl Iterator<Item = CumulativeRevenuePoint> + '_ {
        prefix_sum(self.daily.iter().copied()).map(|(order_date, total)| {
            CumulativeRevenuePoint {
                order_date,
                cumulative_revenue: round_money(total),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.daily.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    pub fn to_vec(&self) -> Vec<CumulativeRevenuePoint> {
        self.iter().collect()
    }
}
