//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const ORDERS_CSV: &str = "\
order_id,date,time
1,2015-01-01,11:38:36
2,2015-01-01,11:57:40
3,2015-01-01,12:12:28
4,2015-01-02,12:16:31
5,2015-01-03,18:33:10
";

pub const ORDER_DETAILS_CSV: &str = "\
order_details_id,order_id,pizza_id,quantity
1,1,hawaiian_m,1
2,2,classic_dlx_m,1
3,2,five_cheese_l,1
4,2,thai_ckn_l,2
5,3,spicy_ital_l,1
6,4,bbq_ckn_s,1
7,4,hawaiian_m,2
8,5,bbq_ckn_l,1
9,5,classic_dlx_m,3
";

pub const PIZZAS_CSV: &str = "\
pizza_id,pizza_type_id,size,price
bbq_ckn_s,bbq_ckn,S,12.75
bbq_ckn_l,bbq_ckn,L,20.75
thai_ckn_l,thai_ckn,L,20.75
hawaiian_m,hawaiian,M,13.25
classic_dlx_m,classic_dlx,M,16
spicy_ital_l,spicy_ital,L,20.75
five_cheese_l,five_cheese,L,18.5
";

pub const PIZZA_TYPES_CSV: &str = "\
pizza_type_id,name,category,ingredients
bbq_ckn,The Barbecue Chicken Pizza,Chicken,\"Barbecued Chicken, Red Peppers, Green Peppers, Tomatoes, Red Onions, Barbecue Sauce\"
thai_ckn,The Thai Chicken Pizza,Chicken,\"Chicken, Pineapple, Tomatoes, Red Peppers, Thai Sweet Chilli Sauce\"
hawaiian,The Hawaiian Pizza,Classic,\"Sliced Ham, Pineapple, Mozzarella Cheese\"
classic_dlx,The Classic Deluxe Pizza,Classic,\"Pepperoni, Mushrooms, Red Onions, Red Peppers, Bacon\"
spicy_ital,The Spicy Italian Pizza,Supreme,\"Capocollo, Tomatoes, Goat Cheese, Artichokes, Peperoncini verdi, Garlic\"
five_cheese,The Five Cheese Pizza,Veggie,\"Mozzarella Cheese, Provolone Cheese, Smoked Gouda Cheese, Romano Cheese, Blue Cheese, Garlic\"
mexicana,The Mexicana Pizza,Veggie,\"Tomatoes, Red Peppers, Jalapeno Peppers, Red Onions, Cilantro, Corn, Chipotle Sauce, Garlic\"
";

/// Builder for a temporary directory holding the four CSV tables
pub struct SalesFixture {
    temp_dir: TempDir,
    orders: String,
    order_details: String,
    pizzas: String,
    pizza_types: String,
}

impl SalesFixture {
    /// Start from the standard five-order data set
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            orders: ORDERS_CSV.to_string(),
            order_details: ORDER_DETAILS_CSV.to_string(),
            pizzas: PIZZAS_CSV.to_string(),
            pizza_types: PIZZA_TYPES_CSV.to_string(),
        })
    }

    /// Append raw CSV lines to order_details.csv
    pub fn with_extra_details(mut self, lines: &str) -> Self {
        self.order_details.push_str(lines);
        self
    }

    pub fn with_order_details(mut self, csv: &str) -> Self {
        self.order_details = csv.to_string();
        self
    }

    pub fn with_pizzas(mut self, csv: &str) -> Self {
        self.pizzas = csv.to_string();
        self
    }

    /// Write the tables and return the guard owning the directory
    pub fn write(self) -> Result<TempDir> {
        let dir = self.temp_dir.path();
        write_table(dir, "orders.csv", &self.orders)?;
        write_table(dir, "order_details.csv", &self.order_details)?;
        write_table(dir, "pizzas.csv", &self.pizzas)?;
        write_table(dir, "pizza_types.csv", &self.pizza_types)?;
        Ok(self.temp_dir)
    }
}

fn write_table(dir: &Path, name: &str, content: &str) -> Result<()> {
    fs::write(dir.join(name), content)?;
    Ok(())
}
