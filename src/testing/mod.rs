//! Testing utilities and fixtures
//!
//! Builders for joined rows and a small, hand-checked sales data set used
//! across the unit tests.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::join::JoinedRow;
use crate::model::{Order, OrderDetail, Pizza, PizzaSize, PizzaType, SalesData};

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::from_str(value).expect("valid date literal")
}

pub fn time(value: &str) -> NaiveTime {
    NaiveTime::from_str(value).expect("valid time literal")
}

/// Builder for a single [`JoinedRow`] with sensible defaults
pub struct RowBuilder {
    row: JoinedRow,
}

impl RowBuilder {
    pub fn new(order_id: u64, name: &str) -> Self {
        Self {
            row: JoinedRow {
                order_id,
                order_date: date("2015-01-01"),
                order_time: time("12:00:00"),
                pizza_id: format!("{}_m", name.to_lowercase().replace(' ', "_")),
                pizza_type_id: name.to_lowercase().replace(' ', "_"),
                name: name.to_string(),
                category: "Classic".to_string(),
                size: PizzaSize::Medium,
                price: dec("10.00"),
                quantity: 1,
            },
        }
    }

    pub fn date(mut self, value: &str) -> Self {
        self.row.order_date = date(value);
        self
    }

    pub fn time(mut self, value: &str) -> Self {
        self.row.order_time = time(value);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.row.category = category.to_string();
        self
    }

    pub fn price(mut self, value: &str) -> Self {
        self.row.price = dec(value);
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.row.quantity = quantity;
        self
    }

    pub fn build(self) -> JoinedRow {
        self.row
    }
}

/// Three orders over two days across two categories
///
/// | order | date       | time     | pizza              | category | price | qty |
/// |-------|------------|----------|--------------------|----------|-------|-----|
/// | 1     | 2015-01-01 | 11:38:36 | hawaiian_m         | Classic  | 13.25 | 1   |
/// | 1     | 2015-01-01 | 11:38:36 | thai_ckn_l         | Chicken  | 20.75 | 2   |
/// | 2     | 2015-01-01 | 13:02:59 | hawaiian_m         | Classic  | 13.25 | 3   |
/// | 3     | 2015-01-02 | 13:45:00 | bbq_ckn_s          | Chicken  | 12.75 | 1   |
pub fn sample_sales_data() -> SalesData {
    SalesData::builder()
        .orders([
            Order {
                order_id: 1,
                order_date: date("2015-01-01"),
                order_time: time("11:38:36"),
            },
            Order {
                order_id: 2,
                order_date: date("2015-01-01"),
                order_time: time("13:02:59"),
            },
            Order {
                order_id: 3,
                order_date: date("2015-01-02"),
                order_time: time("13:45:00"),
            },
        ])
        .order_details([
            detail(1, 1, "hawaiian_m", 1),
            detail(2, 1, "thai_ckn_l", 2),
            detail(3, 2, "hawaiian_m", 3),
            detail(4, 3, "bbq_ckn_s", 1),
        ])
        .pizzas([
            pizza("hawaiian_m", "hawaiian", PizzaSize::Medium, "13.25"),
            pizza("thai_ckn_l", "thai_ckn", PizzaSize::Large, "20.75"),
            pizza("bbq_ckn_s", "bbq_ckn", PizzaSize::Small, "12.75"),
        ])
        .pizza_types([
            pizza_type("hawaiian", "The Hawaiian Pizza", "Classic"),
            pizza_type("thai_ckn", "The Thai Chicken Pizza", "Chicken"),
            pizza_type("bbq_ckn", "The Barbecue Chicken Pizza", "Chicken"),
            pizza_type("five_cheese", "The Five Cheese Pizza", "Veggie"),
        ])
        .build()
        .expect("sample data is valid")
}

fn detail(id: u64, order_id: u64, pizza_id: &str, quantity: i64) -> OrderDetail {
    OrderDetail {
        order_details_id: id,
        order_id,
        pizza_id: pizza_id.to_string(),
        quantity,
    }
}

fn pizza(pizza_id: &str, pizza_type_id: &str, size: PizzaSize, price: &str) -> Pizza {
    Pizza {
        pizza_id: pizza_id.to_string(),
        pizza_type_id: pizza_type_id.to_string(),
        size,
        price: dec(price),
    }
}

fn pizza_type(pizza_type_id: &str, name: &str, category: &str) -> PizzaType {
    PizzaType {
        pizza_type_id: pizza_type_id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        ingredients: None,
    }
}
