//! Aggregation engine for the sales reports
//!
//! Every operation is a pure function of the joined rows. Grouping uses
//! ordered maps so results are deterministic; sums stay exact `Decimal`s and
//! are rounded only when the result records are built.

use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::debug;

use crate::error::{AnalyticsError, Result};
use crate::join::JoinedRow;
use crate::model::{OrderId, PizzaType};
use crate::report::rounding::{div_round_nearest, round_money};
use crate::window::partitioned_rank;

pub mod records;

pub use records::{
    CategoryCount, CategoryQuantity, CategoryRanking, CategoryShare, CumulativeRevenue,
    CumulativeRevenuePoint, HourlyOrders, PizzaQuantity, PizzaRevenue, QuantityBucket,
    SalesSummary,
};

/// Read-only analytics over a snapshot of joined rows
#[derive(Debug, Clone, Copy)]
pub struct SalesAnalytics<'a> {
    rows: &'a [JoinedRow],
}

impl<'a> SalesAnalytics<'a> {
    pub fn new(rows: &'a [JoinedRow]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &'a [JoinedRow] {
        self.rows
    }

    /// Number of distinct orders
    pub fn count_orders(&self) -> u64 {
        let orders: HashSet<OrderId> = self.rows.iter().map(|r| r.order_id).collect();
        orders.len() as u64
    }

    /// Sum of price × quantity, rounded to cents; zero for an empty row set
    pub fn total_revenue(&self) -> Decimal {
        round_money(self.exact_revenue())
    }

    fn exact_revenue(&self) -> Decimal {
        self.rows.iter().map(JoinedRow::revenue).sum()
    }

    /// Pizzas with the highest total quantity, ties broken by name
    pub fn top_n_by_quantity(&self, n: usize) -> Vec<PizzaQuantity> {
        let mut by_name: HashMap<&str, u64> = HashMap::new();
        for row in self.rows {
            *by_name.entry(row.name.as_str()).or_insert(0) += row.quantity;
        }

        let mut ranked: Vec<(&str, u64)> = by_name.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        debug!("top_n_by_quantity: {} pizzas, keeping {}", ranked.len(), n);

        ranked
            .into_iter()
            .take(n)
            .map(|(name, quantity)| PizzaQuantity {
                name: name.to_string(),
                quantity,
            })
            .collect()
    }

    /// How many order lines carry each quantity value
    pub fn quantity_histogram(&self) -> Vec<QuantityBucket> {
        let mut buckets: BTreeMap<u64, u64> = BTreeMap::new();
        for row in self.rows {
            *buckets.entry(row.quantity).or_insert(0) += 1;
        }

        buckets
            .into_iter()
            .map(|(quantity, line_count)| QuantityBucket {
                quantity,
                line_count,
            })
            .collect()
    }

    /// Quantity sold per category, smallest first
    pub fn category_totals(&self) -> Vec<CategoryQuantity> {
        let mut by_category: BTreeMap<&str, u64> = BTreeMap::new();
        for row in self.rows {
            *by_category.entry(row.category.as_str()).or_insert(0) += row.quantity;
        }

        let mut totals: Vec<CategoryQuantity> = by_category
            .into_iter()
            .map(|(category, quantity)| CategoryQuantity {
                category: category.to_string(),
                quantity,
            })
            .collect();
        // stable sort keeps category order for equal quantities
        totals.sort_by_key(|t| t.quantity);
        totals
    }

    /// Distinct orders per hour of the day, for hours that saw orders
    pub fn hourly_distribution(&self) -> Vec<HourlyOrders> {
        let mut by_hour: BTreeMap<u32, HashSet<OrderId>> = BTreeMap::new();
        for row in self.rows {
            by_hour
                .entry(row.order_time.hour())
                .or_default()
                .insert(row.order_id);
        }

        by_hour
            .into_iter()
            .map(|(hour, orders)| HourlyOrders {
                hour,
                order_count: orders.len() as u64,
            })
            .collect()
    }

    /// Distinct pizza types sold per category
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut by_category: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
        for row in self.rows {
            by_category
                .entry(row.category.as_str())
                .or_default()
                .insert(row.pizza_type_id.as_str());
        }

        by_category
            .into_iter()
            .map(|(category, types)| CategoryCount {
                category: category.to_string(),
                pizza_type_count: types.len() as u64,
            })
            .collect()
    }

    /// Average of the per-day quantity sums, rounded to the nearest integer
    pub fn avg_daily_quantity(&self) -> Result<u64> {
        let mut by_date: HashMap<NaiveDate, u64> = HashMap::new();
        for row in self.rows {
            *by_date.entry(row.order_date).or_insert(0) += row.quantity;
        }

        if by_date.is_empty() {
            return Err(AnalyticsError::empty_input("avg_daily_quantity"));
        }

        let days = by_date.len() as u64;
        let total: u64 = by_date.values().sum();
        Ok(div_round_nearest(total, days))
    }

    /// Pizzas with the highest revenue, ties broken by name
    pub fn top_n_by_revenue(&self, n: usize) -> Vec<PizzaRevenue> {
        let mut ranked: Vec<(&str, Decimal)> = self.revenue_by_name().into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .take(n)
            .map(|(name, revenue)| PizzaRevenue {
                name: name.to_string(),
                revenue: round_money(revenue),
            })
            .collect()
    }

    fn revenue_by_name(&self) -> HashMap<&'a str, Decimal> {
        let mut by_name: HashMap<&'a str, Decimal> = HashMap::new();
        for row in self.rows {
            *by_name.entry(row.name.as_str()).or_default() += row.revenue();
        }
        by_name
    }

    /// Each category's percentage of total revenue, largest first
    pub fn revenue_percent_by_category(&self) -> Result<Vec<CategoryShare>> {
        if self.rows.is_empty() {
            return Err(AnalyticsError::empty_input("revenue_percent_by_category"));
        }

        let total = self.exact_revenue();
        if total.is_zero() {
            return Err(AnalyticsError::empty_input("revenue_percent_by_category"));
        }

        let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
        for row in self.rows {
            *by_category.entry(row.category.as_str()).or_default() += row.revenue();
        }

        // divide first: revenue / total <= 1 keeps the product in range
        let hundred = Decimal::ONE_HUNDRED;
        let mut shares: Vec<(&str, Decimal)> = by_category
            .into_iter()
            .map(|(category, revenue)| (category, revenue / total * hundred))
            .collect();
        shares.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Ok(shares
            .into_iter()
            .map(|(category, percent)| CategoryShare {
                category: category.to_string(),
                revenue_percent: round_money(percent),
            })
            .collect())
    }

    /// Revenue per date as a restartable running total, oldest date first
    pub fn cumulative_revenue_by_date(&self) -> CumulativeRevenue {
        let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for row in self.rows {
            *by_date.entry(row.order_date).or_default() += row.revenue();
        }
        CumulativeRevenue::from_daily(by_date.into_iter().collect())
    }

    /// Top `n` pizzas by revenue within each category
    ///
    /// Ranks follow competition ranking, so tied revenues share a rank.
    /// At most `n` rows are kept per category; when a tie straddles the
    /// cut-off, names earlier in alphabetical order are kept.
    pub fn top_n_by_revenue_per_category(&self, n: usize) -> Vec<CategoryRanking> {
        let mut by_pair: BTreeMap<(&str, &str), Decimal> = BTreeMap::new();
        for row in self.rows {
            *by_pair
                .entry((row.category.as_str(), row.name.as_str()))
                .or_default() += row.revenue();
        }

        let ranked = partitioned_rank(
            by_pair,
            |((category, _), _)| *category,
            |(_, revenue)| *revenue,
            |((_, a), _), ((_, b), _)| a.cmp(b),
            n,
        );

        let mut kept_per_category: HashMap<&str, usize> = HashMap::new();
        ranked
            .into_iter()
            .filter(|item| {
                let kept = kept_per_category.entry(item.row.0 .0).or_insert(0);
                *kept += 1;
                *kept <= n
            })
            .map(|item| {
                let ((category, name), revenue) = item.row;
                CategoryRanking {
                    category: category.to_string(),
                    name: name.to_string(),
                    revenue: round_money(revenue),
                    rank: item.rank,
                }
            })
            .collect()
    }

    /// Headline numbers for the summary report
    pub fn summary(&self) -> SalesSummary {
        SalesSummary {
            total_orders: self.count_orders(),
            total_revenue: self.total_revenue(),
            avg_daily_quantity: self.avg_daily_quantity().ok(),
        }
    }
}

/// Distinct pizza types per category across the whole menu
///
/// Unlike [`SalesAnalytics::category_counts`], this counts menu entries that
/// were never ordered too.
pub fn menu_category_counts(pizza_types: &[PizzaType]) -> Vec<CategoryCount> {
    let mut by_category: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for pizza_type in pizza_types {
        by_category
            .entry(pizza_type.category.as_str())
            .or_default()
            .insert(pizza_type.pizza_type_id.as_str());
    }

    by_category
        .into_iter()
        .map(|(category, types)| CategoryCount {
            category: category.to_string(),
            pizza_type_count: types.len() as u64,
        })
        .collect()
}
