//! Join resolver: order_details ⋈ orders ⋈ pizzas ⋈ pizza_types
//!
//! Produces one denormalized [`JoinedRow`] per order detail. What happens
//! when a foreign key does not resolve is decided by [`JoinPolicy`].

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{AnalyticsError, Result};
use crate::model::{Entity, OrderDetail, OrderId, PizzaSize, SalesData};

/// How unresolved foreign keys are treated during the join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// Fail on the first key that does not resolve
    #[default]
    Strict,
    /// Inner-join semantics: silently drop rows whose keys do not resolve
    DropUnmatched,
}

impl FromStr for JoinPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(Self::Strict),
            "drop_unmatched" | "lenient" => Ok(Self::DropUnmatched),
            other => Err(format!("unknown join policy '{other}'")),
        }
    }
}

/// One order detail with its order, pizza and pizza type attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedRow {
    pub order_id: OrderId,
    pub order_date: NaiveDate,
    pub order_time: NaiveTime,
    pub pizza_id: String,
    pub pizza_type_id: String,
    pub name: String,
    pub category: String,
    pub size: PizzaSize,
    pub price: Decimal,
    pub quantity: u64,
}

impl JoinedRow {
    /// price × quantity, unrounded
    pub fn revenue(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The denormalized row set produced by [`resolve`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    rows: Vec<JoinedRow>,
    dropped: usize,
}

impl RowSet {
    pub fn rows(&self) -> &[JoinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of order details dropped under [`JoinPolicy::DropUnmatched`]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_rows(self) -> Vec<JoinedRow> {
        self.rows
    }
}

impl From<Vec<JoinedRow>> for RowSet {
    fn from(rows: Vec<JoinedRow>) -> Self {
        Self { rows, dropped: 0 }
    }
}

/// Join the four tables into one row per order detail, in order_details order
pub fn resolve(data: &SalesData, policy: JoinPolicy) -> Result<RowSet> {
    let mut rows = Vec::with_capacity(data.order_details().len());
    let mut dropped = 0;

    for detail in data.order_details() {
        match join_detail(data, detail) {
            Ok(row) => rows.push(row),
            Err(err) => match policy {
                JoinPolicy::Strict => return Err(err),
                JoinPolicy::DropUnmatched => {
                    debug!("Dropping order detail {}: {}", detail.order_details_id, err);
                    dropped += 1;
                }
            },
        }
    }

    if dropped > 0 {
        warn!(
            "Dropped {} of {} order details with unresolved references",
            dropped,
            data.order_details().len()
        );
    }

    Ok(RowSet { rows, dropped })
}

fn join_detail(data: &SalesData, detail: &OrderDetail) -> Result<JoinedRow> {
    let order = data
        .order(detail.order_id)
        .ok_or_else(|| AnalyticsError::missing_reference(Entity::Order, detail.order_id.to_string()))?;
    let pizza = data
        .pizza(&detail.pizza_id)
        .ok_or_else(|| AnalyticsError::missing_reference(Entity::Pizza, detail.pizza_id.as_str()))?;
    let pizza_type = data.pizza_type(&pizza.pizza_type_id).ok_or_else(|| {
        AnalyticsError::missing_reference(Entity::PizzaType, pizza.pizza_type_id.as_str())
    })?;

    // 1..=MAX_QUANTITY is guaranteed by SalesDataBuilder::build
    let quantity = u64::try_from(detail.quantity).map_err(|_| AnalyticsError::InvalidQuantity {
        order_details_id: detail.order_details_id,
        quantity: detail.quantity,
    })?;

    Ok(JoinedRow {
        order_id: order.order_id,
        order_date: order.order_date,
        order_time: order.order_time,
        pizza_id: pizza.pizza_id.clone(),
        pizza_type_id: pizza_type.pizza_type_id.clone(),
        name: pizza_type.name.clone(),
        category: pizza_type.category.clone(),
        size: pizza.size,
        price: pizza.price,
        quantity,
    })
}
