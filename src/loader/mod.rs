//! CSV loader for the four sales tables
//!
//! Expects a directory laid out like the public pizza sales extract:
//! `orders.csv`, `order_details.csv`, `pizzas.csv`, `pizza_types.csv`, each
//! with a header row. Rows are validated when the [`SalesData`] is built, so
//! bad quantities or prices fail the load instead of being dropped.

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{AnalyticsError, Result};
use crate::model::{Order, OrderDetail, Pizza, PizzaType, SalesData};

pub const ORDERS_FILE: &str = "orders.csv";
pub const ORDER_DETAILS_FILE: &str = "order_details.csv";
pub const PIZZAS_FILE: &str = "pizzas.csv";
pub const PIZZA_TYPES_FILE: &str = "pizza_types.csv";

/// Deserialize every row of one table from a CSV source
pub fn read_table<T, R>(reader: R, table: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|source| AnalyticsError::Csv {
            table: table.to_string(),
            source,
        })?;

    debug!("Read {} rows from {}", rows.len(), table);
    Ok(rows)
}

fn read_file<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>> {
    let path = dir.join(file_name);
    let file = File::open(&path).map_err(|source| AnalyticsError::Io {
        path: path.clone(),
        source,
    })?;
    read_table(file, file_name)
}

/// Load and validate the four tables from a directory of CSV files
pub fn load_csv_dir(dir: impl AsRef<Path>) -> Result<SalesData> {
    let dir = dir.as_ref();
    debug!("Loading sales data from {}", dir.display());

    let orders: Vec<Order> = read_file(dir, ORDERS_FILE)?;
    let order_details: Vec<OrderDetail> = read_file(dir, ORDER_DETAILS_FILE)?;
    let pizzas: Vec<Pizza> = read_file(dir, PIZZAS_FILE)?;
    let pizza_types: Vec<PizzaType> = read_file(dir, PIZZA_TYPES_FILE)?;

    SalesData::builder()
        .orders(orders)
        .order_details(order_details)
        .pizzas(pizzas)
        .pizza_types(pizza_types)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PizzaSize;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_orders() {
        let csv = "order_id,date,time\n1,2015-01-01,11:38:36\n2,2015-01-02,23:05:00\n";
        let orders: Vec<Order> = read_table(csv.as_bytes(), ORDERS_FILE).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(
            orders[0].order_date,
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
        );
        assert_eq!(
            orders[1].order_time,
            NaiveTime::from_hms_opt(23, 5, 0).unwrap()
        );
    }

    #[test]
    fn test_read_pizzas_parses_size_and_price() {
        let csv = "pizza_id,pizza_type_id,size,price\nbbq_ckn_s,bbq_ckn,S,12.75\n";
        let pizzas: Vec<Pizza> = read_table(csv.as_bytes(), PIZZAS_FILE).unwrap();

        assert_eq!(pizzas[0].size, PizzaSize::Small);
        assert_eq!(pizzas[0].price, Decimal::new(1275, 2));
    }

    #[test]
    fn test_read_pizza_types_without_ingredients_column() {
        let csv = "pizza_type_id,name,category\nbbq_ckn,The Barbecue Chicken Pizza,Chicken\n";
        let types: Vec<PizzaType> = read_table(csv.as_bytes(), PIZZA_TYPES_FILE).unwrap();

        assert_eq!(types[0].category, "Chicken");
        assert!(types[0].ingredients.is_none());
    }

    #[test]
    fn test_malformed_row_reports_table() {
        let csv = "order_details_id,order_id,pizza_id,quantity\n1,1,bbq_ckn_s,two\n";
        let err = read_table::<OrderDetail, _>(csv.as_bytes(), ORDER_DETAILS_FILE).unwrap_err();

        match err {
            AnalyticsError::Csv { table, .. } => assert_eq!(table, ORDER_DETAILS_FILE),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_csv_dir_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_csv_dir(dir.path()).unwrap_err();

        match err {
            AnalyticsError::Io { path, .. } => assert!(path.ends_with(ORDERS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_csv_dir_validates_quantity() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(ORDERS_FILE),
            "order_id,date,time\n1,2015-01-01,11:38:36\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(ORDER_DETAILS_FILE),
            "order_details_id,order_id,pizza_id,quantity\n1,1,bbq_ckn_s,-1\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(PIZZAS_FILE),
            "pizza_id,pizza_type_id,size,price\nbbq_ckn_s,bbq_ckn,S,12.75\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(PIZZA_TYPES_FILE),
            "pizza_type_id,name,category,ingredients\nbbq_ckn,The Barbecue Chicken Pizza,Chicken,\"Barbecued Chicken, Red Peppers\"\n",
        )
        .unwrap();

        let err = load_csv_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::InvalidQuantity { quantity: -1, .. }
        ));
    }
}
