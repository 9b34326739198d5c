//! Typed data model for the four sales tables
//!
//! Records mirror the columns of the public pizza sales extract. Column names
//! that differ from the field names are mapped with serde renames so the same
//! types deserialize straight from CSV.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod tables;

pub use tables::{SalesData, SalesDataBuilder};

pub type OrderId = u64;
pub type OrderDetailId = u64;

/// Largest quantity accepted on one order line
///
/// With [`MAX_PRICE`] this keeps a line's revenue below 2^63, so the `u64`
/// quantity sums and `Decimal` revenue sums cannot overflow for any row set
/// that fits in memory.
pub const MAX_QUANTITY: i64 = u32::MAX as i64;

/// Largest unit price accepted for a pizza
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// The four entity kinds, used to label integrity errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Order,
    OrderDetail,
    Pizza,
    PizzaType,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Order => "order",
            Self::OrderDetail => "order detail",
            Self::Pizza => "pizza",
            Self::PizzaType => "pizza type",
        };
        f.write_str(name)
    }
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    #[serde(rename = "date")]
    pub order_date: NaiveDate,
    #[serde(rename = "time")]
    pub order_time: NaiveTime,
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_details_id: OrderDetailId,
    pub order_id: OrderId,
    pub pizza_id: String,
    /// Signed so that bad extracts surface as validation errors, not parse errors
    pub quantity: i64,
}

/// Pizza sizes offered on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PizzaSize {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
    #[serde(rename = "XXL")]
    DoubleExtraLarge,
}

impl PizzaSize {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::ExtraLarge => "XL",
            Self::DoubleExtraLarge => "XXL",
        }
    }
}

impl fmt::Display for PizzaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A sellable pizza: one type in one size at one price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    pub pizza_id: String,
    pub pizza_type_id: String,
    pub size: PizzaSize,
    pub price: Decimal,
}

/// A menu entry shared by all sizes of the same pizza
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaType {
    pub pizza_type_id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub ingredients: Option<String>,
}
